use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Response};
use serde::{de::DeserializeOwned, Serialize};

#[cfg(target_arch = "wasm32")]
use crate::Credentials;
use crate::{
    handler::{DetailErrorHandler, ErrorHandler, Rejection},
    retry::RetryState,
    AuthSession, BackendError, ClientOptions, RequestOptions, Result,
};

/// Why a single attempt did not produce a successful response.
enum Failure {
    Transport(reqwest::Error),
    Rejected(Rejection),
}

#[derive(Clone)]
/// HTTP client for the backend API.
///
/// Every request is sent to `backend_api_url + path` with credentials
/// included. When reauthentication is enabled, a 401 answer triggers one
/// session refresh followed by one re-send of the original request.
pub struct BackendClient {
    http: reqwest::Client,
    options: ClientOptions,
    session: AuthSession,
    handler: Arc<dyn ErrorHandler>,
}

impl fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendClient")
            .field("options", &self.options)
            .field("session", &self.session)
            .finish()
    }
}

impl BackendClient {
    /// Creates a client with a fresh session refreshed through
    /// `{frontend_url}/auth/token`.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let session = AuthSession::new(&options.frontend_url);
        Self::with_session(options, session)
    }

    /// Creates a client from environment variables.
    ///
    /// See [`ClientOptions::from_env`] for the variables read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self> {
        Self::new(ClientOptions::from_env())
    }

    /// Creates a client around an existing authentication session.
    ///
    /// On native targets the HTTP client stores and sends cookies through
    /// the session's jar.
    pub fn with_session(options: ClientOptions, session: AuthSession) -> Result<Self> {
        let builder = reqwest::Client::builder();

        #[cfg(not(target_arch = "wasm32"))]
        let builder = {
            let builder = builder.cookie_provider(Arc::clone(session.cookies()));
            match options.timeout_ms {
                Some(timeout_ms) => builder.timeout(Duration::from_millis(timeout_ms)),
                None => builder,
            }
        };

        let http = builder.build().map_err(BackendError::Client)?;

        Ok(Self {
            http,
            options,
            session,
            handler: Arc::new(DetailErrorHandler),
        })
    }

    /// Replaces the collaborator that classifies error responses.
    pub fn with_error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.handler = Arc::new(handler);
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Full URL a request path is sent to.
    ///
    /// Example: `"/health"` → `"http://localhost:8000/api/health"`
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.options.backend_api_url, path)
    }

    /// Sends a request to the backend.
    ///
    /// Returns the response untouched when the backend answers with success.
    /// Otherwise fails with:
    /// - [`BackendError::NoConnection`] when the backend or the session
    ///   refresh route is unreachable, or the error body has no `detail`
    /// - [`BackendError::Server`] for structured errors, including a 401 that
    ///   could not be recovered by refreshing the session
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Response> {
        let options = options.with_forced_credentials();
        let mut retry = RetryState::default();

        loop {
            let error = match self.send_once(path, &options).await {
                Ok(response) => return Ok(response),
                Err(Failure::Transport(err)) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(path, error = %err, "backend unreachable");
                    // The cause is discarded — suppress unused variable warning.
                    #[cfg(not(feature = "tracing"))]
                    let _ = err;
                    return Err(BackendError::NoConnection);
                }
                Err(Failure::Rejected(Rejection::Unstructured { status })) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(path, status, "error response without detail");
                    #[cfg(not(feature = "tracing"))]
                    let _ = status;
                    return Err(BackendError::NoConnection);
                }
                Err(Failure::Rejected(Rejection::Structured(error))) => error,
            };

            if error.status != 401 || !retry.try_consume(self.options.reauthenticate) {
                return Err(error.into());
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(path, "unauthorized, refreshing session before retry");

            self.session.refresh(&self.http).await?;
        }
    }

    /// Sends a `GET` request.
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.request(path, RequestOptions::default()).await
    }

    /// Sends a `GET` request and decodes the JSON response body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(path).await?;
        decode_json(response).await
    }

    /// Sends a `POST` request with a JSON body.
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let options = RequestOptions::new(Method::POST).json(body)?;
        self.request(path, options).await
    }

    async fn send_once(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> std::result::Result<Response, Failure> {
        let mut request = self
            .http
            .request(options.effective_method(), self.endpoint_url(path))
            .headers(options.headers.clone());

        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }
        if let Some(timeout) = self.request_timeout(options) {
            request = request.timeout(timeout);
        }

        // Native clients always carry the session jar; the browser needs to be told.
        #[cfg(target_arch = "wasm32")]
        let request = match options.credentials.unwrap_or_default() {
            Credentials::Include => request.fetch_credentials_include(),
            Credentials::SameOrigin => request.fetch_credentials_same_origin(),
            Credentials::Omit => request.fetch_credentials_omit(),
        };

        let response = request.send().await.map_err(Failure::Transport)?;
        let status = response.status();
        if self.handler.is_success(status) {
            return Ok(response);
        }

        let body = response.text().await.map_err(Failure::Transport)?;
        Err(Failure::Rejected(self.handler.reject(status, &body)))
    }

    fn request_timeout(&self, options: &RequestOptions) -> Option<Duration> {
        options.timeout.or_else(|| {
            // Native clients apply the client-wide timeout at build time.
            if cfg!(target_arch = "wasm32") {
                self.options.timeout_ms.map(Duration::from_millis)
            } else {
                None
            }
        })
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await.map_err(|err| {
        #[cfg(feature = "tracing")]
        tracing::debug!(error = %err, "failed to read response body");
        #[cfg(not(feature = "tracing"))]
        let _ = err;
        BackendError::NoConnection
    })?;
    serde_json::from_str(&body)
        .map_err(|err| BackendError::Decode(format!("invalid JSON response: {err}; body: {body}")))
}
