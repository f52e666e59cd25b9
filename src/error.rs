use serde_json::Value as JsonValue;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend could not be reached, or answered with an error body that
    /// carries no `detail`. The underlying cause is not preserved.
    #[error("No connection to the server.")]
    NoConnection,
    /// Structured error returned by the backend.
    #[error(transparent)]
    Server(#[from] ServerError),
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Client(reqwest::Error),
    /// Request body serialization error.
    #[error("encode error: {0}")]
    Encode(String),
    /// Response body decoding error.
    #[error("decode error: {0}")]
    Decode(String),
}

impl BackendError {
    /// HTTP status of a structured server error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server(error) => Some(error.status),
            _ => None,
        }
    }

    /// `detail` payload of a structured server error.
    pub fn detail(&self) -> Option<&JsonValue> {
        match self {
            Self::Server(error) => Some(&error.detail),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Error body reported by the backend for a non-success response.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("server error {status}: {}", render_detail(.detail))]
pub struct ServerError {
    /// HTTP status code of the response.
    pub status: u16,
    /// `detail` field of the body: usually a message string, sometimes a
    /// list of validation entries.
    pub detail: JsonValue,
}

impl ServerError {
    pub fn new(status: u16, detail: impl Into<JsonValue>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Returns the detail as text when the backend sent a plain message.
    pub fn message(&self) -> Option<&str> {
        self.detail.as_str()
    }
}

fn render_detail(detail: &JsonValue) -> String {
    match detail {
        JsonValue::String(message) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{BackendError, ServerError};

    #[test]
    fn no_connection_message_is_generic() {
        assert_eq!(
            BackendError::NoConnection.to_string(),
            "No connection to the server."
        );
    }

    #[test]
    fn server_error_displays_string_detail_verbatim() {
        let err = ServerError::new(404, "Dataset not found");
        assert_eq!(err.to_string(), "server error 404: Dataset not found");
        assert_eq!(err.message(), Some("Dataset not found"));
    }

    #[test]
    fn server_error_displays_structured_detail_as_json() {
        let err = ServerError::new(422, json!([{"loc": ["body", "name"], "msg": "field required"}]));
        assert!(err.to_string().starts_with("server error 422: [{"));
        assert_eq!(err.message(), None);
    }

    #[test]
    fn unauthorized_is_detected_from_status() {
        let err = BackendError::from(ServerError::new(401, "Unauthorized"));
        assert!(err.is_unauthorized());
        assert_eq!(err.detail(), Some(&json!("Unauthorized")));
        assert!(!BackendError::NoConnection.is_unauthorized());
    }
}
