//! Response marshaler: converts a canonical response (or an adapter fault)
//! into the gateway envelope, always attaching the CORS headers.

use serde_json::json;
use std::collections::BTreeMap;

use crate::config::AdapterConfig;
use crate::models::{AdapterError, CanonicalResponse, GatewayResponseEnvelope};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CORS_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const CORS_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const CORS_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";

pub const ALLOWED_HEADERS: &str = "Content-Type,Authorization";
pub const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

/// Headers the marshaler owns. Handler-set values for these keys are
/// overridden, not merged: a stale CORS header would break every
/// cross-origin caller uniformly, so CORS correctness takes precedence.
const FORCED: [&str; 4] = [
    CONTENT_TYPE,
    CORS_ALLOW_ORIGIN,
    CORS_ALLOW_HEADERS,
    CORS_ALLOW_METHODS,
];

fn is_forced(name: &str) -> bool {
    FORCED.iter().any(|forced| forced.eq_ignore_ascii_case(name))
}

/// Builds the outbound envelope from the handler's (or the preflight
/// interceptor's) canonical response.
///
/// Status and body pass through unchanged, as do all handler headers except
/// the forced set above.
#[must_use]
pub fn marshal(response: CanonicalResponse, config: &AdapterConfig) -> GatewayResponseEnvelope {
    let mut headers: BTreeMap<String, String> = response
        .headers
        .into_iter()
        .filter(|(name, _)| !is_forced(name))
        .collect();

    headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
    headers.insert(CORS_ALLOW_ORIGIN.to_string(), config.allow_origin.clone());
    headers.insert(CORS_ALLOW_HEADERS.to_string(), ALLOWED_HEADERS.to_string());
    headers.insert(CORS_ALLOW_METHODS.to_string(), ALLOWED_METHODS.to_string());

    GatewayResponseEnvelope {
        status_code: response.status_code,
        headers,
        body: response.body,
    }
}

/// Builds the envelope for an adapter fault: a JSON body carrying the
/// message and kind tag, with the same forced headers as any other response.
///
/// Malformed events take their status from configuration (500 by default,
/// 400 opt-in); everything else is a plain 500.
#[must_use]
pub fn error_envelope(fault: &AdapterError, config: &AdapterConfig) -> GatewayResponseEnvelope {
    let status_code = match fault {
        AdapterError::MalformedEvent(_) => config.malformed_event_status,
        AdapterError::HandlerFault(_) | AdapterError::MarshalFault(_) => 500,
    };

    let body = json!({ "error": fault.to_string(), "type": fault.kind() }).to_string();

    marshal(
        CanonicalResponse {
            status_code,
            headers: BTreeMap::new(),
            body,
        },
        config,
    )
}
