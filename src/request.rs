use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Method,
};
use serde::Serialize;

use crate::{BackendError, Result};

/// Fetch-style credentials mode.
///
/// The client always sends requests with [`Credentials::Include`], whatever
/// the caller put on [`RequestOptions`]. On `wasm32` the forced value selects
/// the fetch credentials mode; native clients always attach the session
/// cookie jar, so the field is not consulted there.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Credentials {
    Omit,
    #[default]
    SameOrigin,
    Include,
}

/// Per-request options passed through to the transport.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    /// HTTP method. `None` means `GET`.
    pub method: Option<Method>,
    pub headers: HeaderMap,
    /// Raw request body. Kept as owned bytes so the request can be re-sent.
    pub body: Option<Vec<u8>>,
    pub credentials: Option<Credentials>,
    /// Overrides the client-wide timeout for this request.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method: Some(method),
            ..Self::default()
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON body and sets `Content-Type`.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)
            .map_err(|err| BackendError::Encode(format!("invalid JSON body: {err}")))?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(body);
        Ok(self)
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the options actually sent: identical except for credentials,
    /// which are always [`Credentials::Include`].
    pub(crate) fn with_forced_credentials(&self) -> Self {
        Self {
            credentials: Some(Credentials::Include),
            ..self.clone()
        }
    }

    pub(crate) fn effective_method(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::{header::CONTENT_TYPE, Method};
    use serde_json::json;

    use super::{Credentials, RequestOptions};

    #[test]
    fn credentials_are_forced_to_include() {
        for options in [
            RequestOptions::default(),
            RequestOptions::default().credentials(Credentials::Omit),
            RequestOptions::default().credentials(Credentials::SameOrigin),
        ] {
            let sent = options.with_forced_credentials();
            assert_eq!(sent.credentials, Some(Credentials::Include));
        }
    }

    #[test]
    fn forcing_credentials_keeps_everything_else() {
        let options = RequestOptions::new(Method::DELETE)
            .body("payload")
            .credentials(Credentials::Omit);
        let sent = options.with_forced_credentials();
        assert_eq!(sent.method, Some(Method::DELETE));
        assert_eq!(sent.body.as_deref(), Some(b"payload".as_slice()));
    }

    #[test]
    fn method_defaults_to_get() {
        assert_eq!(RequestOptions::default().effective_method(), Method::GET);
    }

    #[test]
    fn json_sets_body_and_content_type() {
        let options = RequestOptions::new(Method::POST)
            .json(&json!({"name": "reports"}))
            .expect("json body must encode");
        assert_eq!(options.headers[CONTENT_TYPE], "application/json");
        assert_eq!(
            options.body.as_deref(),
            Some(br#"{"name":"reports"}"#.as_slice())
        );
    }
}
