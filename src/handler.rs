//! Classification of backend responses into success or structured errors.

use reqwest::StatusCode;

use crate::{wire::ErrorBody, ServerError};

/// Outcome of classifying a non-success response.
#[derive(Clone, Debug, PartialEq)]
pub enum Rejection {
    /// The body carried a `detail` field.
    Structured(ServerError),
    /// The body was missing, not JSON, or had no `detail` field.
    Unstructured { status: u16 },
}

/// Decides whether a response is a success and turns error bodies into
/// [`Rejection`] values.
///
/// The client reads the body only for responses that [`is_success`]
/// rejects; successful responses are handed back to the caller untouched.
///
/// [`is_success`]: ErrorHandler::is_success
pub trait ErrorHandler: Send + Sync {
    fn is_success(&self, status: StatusCode) -> bool {
        status.is_success()
    }

    fn reject(&self, status: StatusCode, body: &str) -> Rejection;
}

/// Default handler for backends that report errors as `{"detail": ...}`.
///
/// A `detail` key counts as present even when its value is `null`; only a
/// missing key (or a body that is not a JSON object) is unstructured.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetailErrorHandler;

impl ErrorHandler for DetailErrorHandler {
    fn reject(&self, status: StatusCode, body: &str) -> Rejection {
        match ErrorBody::parse(body).and_then(|parsed| parsed.detail) {
            Some(detail) => Rejection::Structured(ServerError {
                status: status.as_u16(),
                detail,
            }),
            None => Rejection::Unstructured {
                status: status.as_u16(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::{json, Value as JsonValue};

    use super::{DetailErrorHandler, ErrorHandler, Rejection};
    use crate::ServerError;

    #[test]
    fn detail_string_becomes_structured_error() {
        let rejection =
            DetailErrorHandler.reject(StatusCode::UNAUTHORIZED, r#"{"detail":"Unauthorized"}"#);
        assert_eq!(
            rejection,
            Rejection::Structured(ServerError::new(401, "Unauthorized"))
        );
    }

    #[test]
    fn validation_list_is_kept_as_json() {
        let body = r#"{"detail":[{"loc":["body","name"],"msg":"field required"}]}"#;
        let rejection = DetailErrorHandler.reject(StatusCode::UNPROCESSABLE_ENTITY, body);
        match rejection {
            Rejection::Structured(error) => {
                assert_eq!(error.status, 422);
                assert_eq!(error.detail[0]["msg"], json!("field required"));
            }
            other => panic!("expected structured rejection, got {other:?}"),
        }
    }

    #[test]
    fn html_body_is_unstructured() {
        let rejection = DetailErrorHandler.reject(
            StatusCode::BAD_GATEWAY,
            "<html><body>502 Bad Gateway</body></html>",
        );
        assert_eq!(rejection, Rejection::Unstructured { status: 502 });
    }

    #[test]
    fn json_without_detail_is_unstructured() {
        let rejection =
            DetailErrorHandler.reject(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#);
        assert_eq!(rejection, Rejection::Unstructured { status: 500 });
    }

    #[test]
    fn null_detail_still_counts_as_structured() {
        let rejection = DetailErrorHandler.reject(StatusCode::UNAUTHORIZED, r#"{"detail":null}"#);
        assert_eq!(
            rejection,
            Rejection::Structured(ServerError::new(401, JsonValue::Null))
        );
    }

    #[test]
    fn default_success_is_2xx() {
        assert!(DetailErrorHandler.is_success(StatusCode::NO_CONTENT));
        assert!(!DetailErrorHandler.is_success(StatusCode::FOUND));
        assert!(!DetailErrorHandler.is_success(StatusCode::UNAUTHORIZED));
    }
}
