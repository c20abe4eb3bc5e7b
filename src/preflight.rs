//! CORS preflight interception.
//!
//! Browsers send an `OPTIONS` probe before certain cross-origin requests and
//! expect a quick header-only reply. That probe must never reach the inner
//! handler: it carries no credentials, must not trigger authentication or
//! session lookups, and must not cause handler side effects.

use crate::models::CanonicalRequest;

/// True iff the request is a CORS preflight (`OPTIONS` method).
///
/// When this returns true the dispatcher is skipped entirely and the cycle
/// proceeds to the marshaler with
/// [`CanonicalResponse::preflight`](crate::models::CanonicalResponse::preflight).
#[must_use]
pub fn is_preflight(request: &CanonicalRequest) -> bool {
    request.method == "OPTIONS"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Headers;

    fn request(method: &str) -> CanonicalRequest {
        CanonicalRequest {
            method: method.to_string(),
            path: "/api/chat".to_string(),
            query_string: String::new(),
            headers: Headers::new(),
            body: String::new(),
        }
    }

    #[test]
    fn options_is_preflight() {
        assert!(is_preflight(&request("OPTIONS")));
    }

    #[test]
    fn other_methods_are_not() {
        for method in ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD"] {
            assert!(!is_preflight(&request(method)), "{method} misdetected");
        }
    }
}
