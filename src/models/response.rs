//! Canonical response and outbound gateway envelope models.

use serde::Serialize;
use std::collections::BTreeMap;

/// The inner handler's output, captured once per invocation by the dispatcher
/// (or synthesized by the preflight interceptor / failure boundary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalResponse {
    /// Always within `100..=599`; the dispatcher rejects anything else.
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl CanonicalResponse {
    /// The synthesized reply for a CORS preflight request. The marshaler adds
    /// the CORS headers; nothing else is needed.
    #[must_use]
    pub const fn preflight() -> Self {
        Self {
            status_code: 200,
            headers: BTreeMap::new(),
            body: String::new(),
        }
    }
}

/// The response shape API Gateway expects back from the function, identical
/// for REST (v1.0) and HTTP API (v2.0) integrations.
///
/// Built exactly once per invocation by the marshaler; `headers` always
/// carries `Content-Type` and the three CORS headers.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}
