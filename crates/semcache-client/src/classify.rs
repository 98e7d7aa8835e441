//! HTTP status classification.
//!
//! Total mapping from a non-2xx response to exactly one [`ClientError`]
//! variant; there is no "unknown, rethrow raw" path.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use semcache_types::error::ClientError;
use serde_json::Value;

const FALLBACK_MESSAGE: &str = "API request failed";
const AUTH_DEFAULT_MESSAGE: &str = "Invalid or missing API key";
const GENERIC_API_CODE: &str = "api_error";

/// Parse a response body without assuming it is valid JSON.
///
/// A malformed body becomes `{"message": <raw text>}` so the raw text still
/// surfaces through the normal message-resolution path.
pub(crate) fn parse_body(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::json!({ "message": raw }))
}

fn body_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .or_else(|| {
            body.get("detail")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
        })
        .map(str::to_string)
}

fn resolve_message(status: StatusCode, body: &Value) -> String {
    body_message(body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("retry-after")?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Map a failed response to its error variant.
pub(crate) fn classify(status: StatusCode, body: &Value, headers: &HeaderMap) -> ClientError {
    let message = resolve_message(status, body);
    match status.as_u16() {
        400 => ClientError::Validation {
            message,
            details: Some(body.clone()),
        },
        401 | 403 => ClientError::Authentication {
            message: body_message(body).unwrap_or_else(|| AUTH_DEFAULT_MESSAGE.to_string()),
            status: status.as_u16(),
        },
        408 => ClientError::Timeout { message },
        429 => ClientError::RateLimit {
            message,
            retry_after_secs: retry_after_secs(headers),
        },
        500 | 502 | 503 | 504 => ClientError::Server {
            message,
            status: status.as_u16(),
        },
        _ => ClientError::Api {
            message,
            status: status.as_u16(),
            code: GENERIC_API_CODE.to_string(),
            details: Some(body.clone()),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderName, HeaderValue};

    fn status(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap()
    }

    fn headers_with_retry_after(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("retry-after"),
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_400_maps_to_validation_with_details() {
        let body = serde_json::json!({"message": "query must not be empty", "field": "query"});
        let err = classify(status(400), &body, &HeaderMap::new());
        match err {
            ClientError::Validation { message, details } => {
                assert_eq!(message, "query must not be empty");
                assert_eq!(details, Some(body));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_401_and_403_map_to_authentication() {
        for code in [401, 403] {
            let err = classify(status(code), &serde_json::json!({}), &HeaderMap::new());
            match err {
                ClientError::Authentication { message, status } => {
                    assert_eq!(message, "Invalid or missing API key");
                    assert_eq!(status, code);
                }
                other => panic!("expected Authentication for {code}, got {other:?}"),
            }
        }

        // A server-provided message wins over the default
        let body = serde_json::json!({"message": "key revoked"});
        match classify(status(401), &body, &HeaderMap::new()) {
            ClientError::Authentication { message, .. } => assert_eq!(message, "key revoked"),
            other => panic!("expected Authentication, got {other:?}"),
        }
    }

    #[test]
    fn test_408_maps_to_timeout() {
        let err = classify(status(408), &serde_json::json!({}), &HeaderMap::new());
        match err {
            ClientError::Timeout { message } => assert_eq!(message, "Request Timeout"),
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_429_reads_retry_after_header() {
        let err = classify(
            status(429),
            &serde_json::json!({}),
            &headers_with_retry_after("120"),
        );
        match err {
            ClientError::RateLimit {
                retry_after_secs, ..
            } => assert_eq!(retry_after_secs, Some(120)),
            other => panic!("expected RateLimit, got {other:?}"),
        }

        // Absent header
        match classify(status(429), &serde_json::json!({}), &HeaderMap::new()) {
            ClientError::RateLimit {
                retry_after_secs, ..
            } => assert_eq!(retry_after_secs, None),
            other => panic!("expected RateLimit, got {other:?}"),
        }

        // Unparsable header (HTTP-date form) is treated as absent
        match classify(
            status(429),
            &serde_json::json!({}),
            &headers_with_retry_after("Wed, 21 Oct 2026 07:28:00 GMT"),
        ) {
            ClientError::RateLimit {
                retry_after_secs, ..
            } => assert_eq!(retry_after_secs, None),
            other => panic!("expected RateLimit, got {other:?}"),
        }
    }

    #[test]
    fn test_5xx_map_to_server_preserving_status() {
        for code in [500, 502, 503, 504] {
            let err = classify(status(code), &serde_json::json!({}), &HeaderMap::new());
            match err {
                ClientError::Server { status, .. } => assert_eq!(status, code),
                other => panic!("expected Server for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unmapped_status_maps_to_generic_api_error() {
        let body = serde_json::json!({"message": "short and stout"});
        let err = classify(status(418), &body, &HeaderMap::new());
        match err {
            ClientError::Api {
                message,
                status,
                code,
                details,
            } => {
                assert_eq!(message, "short and stout");
                assert_eq!(status, 418);
                assert_eq!(code, "api_error");
                assert_eq!(details, Some(body));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_message_resolution_order() {
        // message field wins
        let body = serde_json::json!({"message": "from message", "detail": "from detail"});
        assert_eq!(resolve_message(status(500), &body), "from message");

        // detail next
        let body = serde_json::json!({"detail": "from detail"});
        assert_eq!(resolve_message(status(500), &body), "from detail");

        // canonical reason phrase next
        let body = serde_json::json!({});
        assert_eq!(resolve_message(status(500), &body), "Internal Server Error");

        // fixed fallback when the status has no reason phrase
        assert_eq!(resolve_message(status(599), &body), FALLBACK_MESSAGE);

        // empty message strings do not short-circuit resolution
        let body = serde_json::json!({"message": ""});
        assert_eq!(resolve_message(status(500), &body), "Internal Server Error");
    }

    #[test]
    fn test_malformed_body_becomes_message_object() {
        let body = parse_body("<html>gateway exploded</html>");
        assert_eq!(
            body,
            serde_json::json!({"message": "<html>gateway exploded</html>"})
        );

        // and flows through classification as the message
        match classify(status(502), &body, &HeaderMap::new()) {
            ClientError::Server { message, status } => {
                assert_eq!(message, "<html>gateway exploded</html>");
                assert_eq!(status, 502);
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }
}
