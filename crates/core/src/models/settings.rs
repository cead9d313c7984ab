use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Client configuration: where the backend lives and how notifications behave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root URL of the allocation backend, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout. `None` leaves transport calls unbounded.
    pub request_timeout_secs: Option<u64>,

    /// How long an error notification stays visible.
    pub notification_ttl_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: None,
            notification_ttl_ms: 2000,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::Validation(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }
        if self.notification_ttl_ms == 0 {
            return Err(CoreError::Validation(
                "notification_ttl_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Base URL with any trailing slashes removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}
