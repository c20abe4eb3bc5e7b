//! Inbound gateway event wire structures.
//!
//! API Gateway delivers one of two incompatible proxy envelopes depending on
//! how the function is integrated: the REST-style "v1.0" shape or the
//! HTTP-API-style "v2.0" shape. These types cover only the fields the adapter
//! reads; everything else in the event is ignored.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Which of the two recognized gateway wire formats an event uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFormat {
    /// REST API (payload format 1.0): top-level `httpMethod`/`path`, query
    /// parameters as a decoded map.
    V1,
    /// HTTP API (payload format 2.0): method nested under
    /// `requestContext.http`, raw path and raw query string.
    V2,
}

/// REST API (v1.0) proxy event.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RestApiEvent {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, Option<String>>>,
    // BTreeMap keeps reconstruction of the query string deterministic.
    #[serde(default)]
    pub query_string_parameters: Option<BTreeMap<String, Option<String>>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
}

/// HTTP API (v2.0) proxy event.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HttpApiEvent {
    pub request_context: RequestContext,
    #[serde(default)]
    pub raw_path: Option<String>,
    #[serde(default)]
    pub raw_query_string: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, Option<String>>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub http: HttpDescription,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HttpDescription {
    #[serde(default)]
    pub method: Option<String>,
}
