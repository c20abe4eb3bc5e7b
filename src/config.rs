//! Adapter configuration.
//!
//! An explicitly constructed value passed into the adapter rather than a
//! process-wide singleton, so the adapter can be exercised deterministically
//! in tests without touching the process environment.

use lambda_runtime::tracing::warn;
use std::env;

/// Environment variable selecting the status for malformed events (400 or 500).
pub const MALFORMED_EVENT_STATUS_VAR: &str = "MALFORMED_EVENT_STATUS";
/// Environment variable overriding the `Access-Control-Allow-Origin` value.
pub const CORS_ALLOW_ORIGIN_VAR: &str = "CORS_ALLOW_ORIGIN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Status reported for events matching neither gateway format. 500 keeps
    /// the historical behavior; 400 is arguably more correct for a bad
    /// request shape, so the choice is left to deployment configuration.
    pub malformed_event_status: u16,
    /// Value for the `Access-Control-Allow-Origin` header.
    pub allow_origin: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            malformed_event_status: 500,
            allow_origin: "*".to_string(),
        }
    }
}

impl AdapterConfig {
    /// Loads the configuration from the environment, keeping defaults for
    /// anything unset or invalid.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var(MALFORMED_EVENT_STATUS_VAR) {
            match parse_malformed_status(&raw) {
                Some(status) => config.malformed_event_status = status,
                None => warn!(
                    value = %raw,
                    "Ignoring {MALFORMED_EVENT_STATUS_VAR}; expected 400 or 500"
                ),
            }
        }

        if let Ok(origin) = env::var(CORS_ALLOW_ORIGIN_VAR)
            && !origin.is_empty()
        {
            config.allow_origin = origin;
        }

        config
    }
}

fn parse_malformed_status(raw: &str) -> Option<u16> {
    match raw.trim().parse::<u16>() {
        Ok(status @ (400 | 500)) => Some(status),
        _ => None,
    }
}
