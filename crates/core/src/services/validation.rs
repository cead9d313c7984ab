//! Input checks run before anything is sent to the backend.

/// Longest accepted ticker symbol.
pub const MAX_TICKER_LEN: usize = 5;

/// `true` iff `s` is 1–5 uppercase ASCII letters.
///
/// No case folding happens here; `"aapl"` is rejected.
pub fn is_valid_ticker(s: &str) -> bool {
    (1..=MAX_TICKER_LEN).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_uppercase())
}

/// Parse `s` as a finite number strictly greater than zero.
pub fn parse_positive_number(s: &str) -> Option<f64> {
    let value: f64 = s.parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// `true` iff `s` parses as a finite, strictly positive number.
pub fn is_positive_number(s: &str) -> bool {
    parse_positive_number(s).is_some()
}
