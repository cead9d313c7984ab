use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A transient error message shown on one notification channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// The two independent channels the store reports errors on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationChannel {
    /// Watch-list (ticker) workflow.
    Ticker,
    /// Portfolio value and allocation workflow.
    Portfolio,
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationChannel::Ticker => write!(f, "ticker"),
            NotificationChannel::Portfolio => write!(f, "portfolio"),
        }
    }
}
