//! Event normalizer: turns either gateway wire format into a
//! [`CanonicalRequest`].
//!
//! Format selection is a single predicate ([`detect`]); both extraction paths
//! share the header folding and body defaulting logic so the two formats
//! cannot drift apart again.

use lambda_runtime::tracing::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::models::event::{EventFormat, HttpApiEvent, RestApiEvent};
use crate::models::{AdapterError, CanonicalRequest, Headers};

/// Detects which gateway wire format an inbound event uses.
///
/// An event carrying `requestContext.http.method` is an HTTP API (v2.0)
/// event; everything else falls back to the REST (v1.0) shape.
#[must_use]
pub fn detect(event: &Value) -> EventFormat {
    let has_v2_method = event
        .get("requestContext")
        .and_then(|ctx| ctx.get("http"))
        .and_then(|http| http.get("method"))
        .is_some();

    if has_v2_method {
        EventFormat::V2
    } else {
        EventFormat::V1
    }
}

/// Extracts a [`CanonicalRequest`] from a gateway event.
///
/// Total over the two recognized shapes: any event carrying a method in one
/// of the two known places normalizes successfully.
///
/// # Errors
///
/// Returns [`AdapterError::MalformedEvent`] if the event matches neither
/// format, the method is missing, or a field has the wrong JSON type.
pub fn normalize(event: &Value) -> Result<CanonicalRequest, AdapterError> {
    let format = detect(event);
    debug!(format = ?format, "Detected gateway event format");

    match format {
        EventFormat::V2 => normalize_v2(event),
        EventFormat::V1 => normalize_v1(event),
    }
}

fn normalize_v2(event: &Value) -> Result<CanonicalRequest, AdapterError> {
    let parsed = HttpApiEvent::deserialize(event)
        .map_err(|e| AdapterError::MalformedEvent(format!("invalid HTTP API (v2.0) event: {e}")))?;

    let method = required_method(parsed.request_context.http.method)?;
    flag_base64_body(parsed.is_base64_encoded);

    Ok(CanonicalRequest {
        method,
        path: normalize_path(parsed.raw_path),
        // Already a single encoded string; passed through unchanged.
        query_string: parsed.raw_query_string.unwrap_or_default(),
        headers: fold_headers(parsed.headers),
        body: parsed.body.unwrap_or_default(),
    })
}

fn normalize_v1(event: &Value) -> Result<CanonicalRequest, AdapterError> {
    let parsed = RestApiEvent::deserialize(event)
        .map_err(|e| AdapterError::MalformedEvent(format!("invalid REST API (v1.0) event: {e}")))?;

    let method = required_method(parsed.http_method)?;
    flag_base64_body(parsed.is_base64_encoded);

    let query_string = parsed
        .query_string_parameters
        .as_ref()
        .map(rebuild_query_string)
        .unwrap_or_default();

    Ok(CanonicalRequest {
        method,
        path: normalize_path(parsed.path),
        query_string,
        headers: fold_headers(parsed.headers),
        body: parsed.body.unwrap_or_default(),
    })
}

fn required_method(method: Option<String>) -> Result<String, AdapterError> {
    method
        .filter(|m| !m.is_empty())
        .map(|m| m.to_ascii_uppercase())
        .ok_or_else(|| {
            AdapterError::MalformedEvent(
                "event carries no HTTP method in either gateway format".to_string(),
            )
        })
}

fn normalize_path(path: Option<String>) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) if path.starts_with('/') => path,
        Some(path) => format!("/{path}"),
        None => "/".to_string(),
    }
}

/// Folds a raw event header map into a case-insensitive [`Headers`] map.
/// Null-valued headers stay present with an empty value.
fn fold_headers(headers: Option<HashMap<String, Option<String>>>) -> Headers {
    headers
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| (name, value.unwrap_or_default()))
        .collect()
}

/// Rebuilds a query string from v1.0 decoded parameters as `key=value` pairs
/// joined with `&`, keys in sorted order.
///
/// Values are NOT re-encoded, matching what the gateway decoded: a value that
/// itself contains `&` or `=` is corrupted relative to the original request.
/// That fidelity loss is flagged rather than silently papered over.
fn rebuild_query_string(params: &BTreeMap<String, Option<String>>) -> String {
    params
        .iter()
        .map(|(key, value)| {
            let value = value.as_deref().unwrap_or_default();
            if value.contains('&') || value.contains('=') {
                warn!(
                    key = %key,
                    "Query parameter value contains '&' or '='; reconstructed query string is not faithful to the original request"
                );
            }
            format!("{key}={value}")
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn flag_base64_body(is_base64_encoded: Option<bool>) {
    if is_base64_encoded == Some(true) {
        // Text-only transport: binary-marked bodies pass through undecoded.
        warn!("Event body is marked base64-encoded; passing it through without decoding");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_v2_by_nested_method() {
        let event = json!({
            "requestContext": { "http": { "method": "GET" } },
            "rawPath": "/health"
        });
        assert_eq!(detect(&event), EventFormat::V2);
    }

    #[test]
    fn falls_back_to_v1_without_nested_method() {
        assert_eq!(detect(&json!({ "httpMethod": "GET", "path": "/health" })), EventFormat::V1);
        // An empty requestContext is not enough to select v2.0.
        assert_eq!(
            detect(&json!({ "httpMethod": "GET", "requestContext": {} })),
            EventFormat::V1
        );
        assert_eq!(detect(&json!({})), EventFormat::V1);
    }

    #[test]
    fn v1_rebuilds_query_string_from_parameter_map() {
        let event = json!({
            "httpMethod": "GET",
            "path": "/api/feedback",
            "queryStringParameters": { "session_id": "abc" }
        });

        let request = normalize(&event).unwrap();
        assert_eq!(request.query_string, "session_id=abc");
    }

    #[test]
    fn v1_joins_multiple_parameters_in_sorted_order() {
        let event = json!({
            "httpMethod": "GET",
            "path": "/api/feedback",
            "queryStringParameters": { "x": "1", "session_id": "abc" }
        });

        let request = normalize(&event).unwrap();
        assert_eq!(request.query_string, "session_id=abc&x=1");
    }

    #[test]
    fn v2_query_string_passes_through_unchanged() {
        let event = json!({
            "requestContext": { "http": { "method": "GET" } },
            "rawPath": "/api/feedback",
            "rawQueryString": "session_id=abc&x=1"
        });

        let request = normalize(&event).unwrap();
        assert_eq!(request.query_string, "session_id=abc&x=1");
    }

    #[test]
    fn null_body_normalizes_to_empty_string() {
        let event = json!({ "httpMethod": "POST", "path": "/api/chat", "body": null });

        let request = normalize(&event).unwrap();
        assert_eq!(request.body, "");
        assert_eq!(request.content_length(), 0);
    }

    #[test]
    fn header_lookup_matches_any_source_casing() {
        let event = json!({
            "httpMethod": "POST",
            "path": "/api/chat",
            "headers": { "Content-Type": "application/json", "AUTHORIZATION": "Bearer t" }
        });

        let request = normalize(&event).unwrap();
        assert_eq!(request.headers.get("content-type"), Some("application/json"));
        assert_eq!(request.headers.get("Authorization"), Some("Bearer t"));
    }

    #[test]
    fn null_header_value_stays_present_but_empty() {
        let event = json!({
            "httpMethod": "GET",
            "path": "/",
            "headers": { "X-Forwarded-For": null }
        });

        let request = normalize(&event).unwrap();
        assert_eq!(request.headers.get("x-forwarded-for"), Some(""));
    }

    #[test]
    fn method_is_upper_cased() {
        let event = json!({ "httpMethod": "post", "path": "/api/chat" });
        let request = normalize(&event).unwrap();
        assert_eq!(request.method, "POST");
    }

    #[test]
    fn missing_path_defaults_to_root() {
        let v1 = normalize(&json!({ "httpMethod": "GET" }))
            .unwrap();
        assert_eq!(v1.path, "/");

        let v2 = normalize(&json!({ "requestContext": { "http": { "method": "GET" } } }))
            .unwrap();
        assert_eq!(v2.path, "/");
    }

    #[test]
    fn path_without_leading_slash_gets_one() {
        let event = json!({ "httpMethod": "GET", "path": "health" });
        let request = normalize(&event).unwrap();
        assert_eq!(request.path, "/health");
    }

    #[test]
    fn missing_method_is_malformed() {
        let result = normalize(&json!({ "path": "/api/chat" }));
        assert!(matches!(result, Err(AdapterError::MalformedEvent(_))));
    }

    #[test]
    fn wrong_header_type_is_malformed() {
        let result = normalize(&json!({ "httpMethod": "GET", "headers": "not-a-map" }));
        assert!(matches!(result, Err(AdapterError::MalformedEvent(_))));
    }

    #[test]
    fn unencoded_value_corruption_is_passed_through() {
        // Known fidelity loss: the rebuilt string cannot round-trip a value
        // containing '&'. It is reconstructed verbatim, not re-encoded.
        let event = json!({
            "httpMethod": "GET",
            "path": "/",
            "queryStringParameters": { "q": "a&b" }
        });

        let request = normalize(&event).unwrap();
        assert_eq!(request.query_string, "q=a&b");
    }
}
