//! User-facing notification texts.

pub const INVALID_TICKER: &str = "Must put in a valid stock ticker (1-5 uppercase letters)";
pub const INVALID_BUDGET: &str = "Portfolio value must be a positive number";
pub const MISSING_ALLOCATION_INPUTS: &str = "Ensure portfolio value and stock tickers are set.";

pub const LOAD_TICKERS_FAILED: &str = "Failed to load stock tickers";
pub const LOAD_BUDGET_FAILED: &str = "Failed to load portfolio value";
pub const ADD_TICKER_FAILED: &str = "Failed to add stock ticker";
pub const DELETE_TICKER_FAILED: &str = "Failed to delete stock ticker";
pub const SET_BUDGET_FAILED: &str = "Failed to set portfolio value";
pub const CALCULATE_FAILED: &str = "Failed to calculate portfolio allocation";

/// Shown when the allocation service reports an undefined Sharpe ratio,
/// which happens when the budget buys no whole share at all.
pub const BUDGET_TOO_SMALL: &str = "Portfolio value is too small to buy a whole share of any stock";
