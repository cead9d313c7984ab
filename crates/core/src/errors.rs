use thiserror::Error;

/// Unified error type for the entire portfolio-allocator-core library.
/// Every resource-client call returns `Result<T, CoreError>`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    // ── Input ───────────────────────────────────────────────────────
    /// Rejected input: caught locally before any request, or refused by the
    /// server with an explicit error payload.
    #[error("Validation failed: {0}")]
    Validation(String),

    // ── API / Network ───────────────────────────────────────────────
    /// Network unreachable, malformed body, or a non-success status without
    /// a usable `{error}` payload.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The allocation service refused a well-formed request.
    #[error("Computation failed: {0}")]
    Computation(String),
}

impl CoreError {
    /// The bare message, without the variant prefix, for display in a notification.
    pub fn user_message(&self) -> &str {
        match self {
            CoreError::Validation(msg)
            | CoreError::Transport(msg)
            | CoreError::Computation(msg) => msg,
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Transport(format!("Malformed response body: {e}"))
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query strings from URLs embedded in reqwest messages.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Transport(sanitized)
    }
}
