#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use reqwest::cookie::Jar;

use crate::{BackendError, Result};

/// Route on the frontend origin that refreshes the session cookies.
pub const TOKEN_REFRESH_PATH: &str = "/auth/token";

/// Authentication state owned by a client: where to refresh the session and,
/// on native targets, the cookie jar holding it.
///
/// Clones share the same jar. On `wasm32` the browser keeps the cookies.
#[derive(Clone)]
pub struct AuthSession {
    refresh_url: String,
    #[cfg(not(target_arch = "wasm32"))]
    cookies: Arc<Jar>,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("refresh_url", &self.refresh_url)
            .field("cookies", &"<redacted>")
            .finish()
    }
}

impl AuthSession {
    /// Creates an empty session that refreshes via `{frontend_url}/auth/token`.
    pub fn new(frontend_url: impl AsRef<str>) -> Self {
        let origin = frontend_url.as_ref().trim_end_matches('/');
        Self::with_refresh_url(format!("{origin}{TOKEN_REFRESH_PATH}"))
    }

    /// Creates an empty session with an explicit refresh URL.
    pub fn with_refresh_url(refresh_url: impl Into<String>) -> Self {
        Self {
            refresh_url: refresh_url.into(),
            #[cfg(not(target_arch = "wasm32"))]
            cookies: Arc::new(Jar::default()),
        }
    }

    /// Replaces the cookie jar, e.g. to share cookies with another client.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_cookies(mut self, cookies: Arc<Jar>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn refresh_url(&self) -> &str {
        &self.refresh_url
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn cookies(&self) -> &Arc<Jar> {
        &self.cookies
    }

    /// Asks the frontend to refresh the session.
    ///
    /// Any HTTP answer counts as a completed refresh, whatever its status:
    /// the caller re-sends its original request and lets the backend decide.
    /// Only a transport failure is reported, as [`BackendError::NoConnection`].
    pub(crate) async fn refresh(&self, http: &reqwest::Client) -> Result<()> {
        let request = http.get(&self.refresh_url);
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        match request.send().await {
            Ok(response) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(status = %response.status(), "session refresh answered");
                // Status is not inspected — suppress unused variable warning.
                #[cfg(not(feature = "tracing"))]
                let _ = response;
                Ok(())
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, "session refresh failed");
                #[cfg(not(feature = "tracing"))]
                let _ = err;
                Err(BackendError::NoConnection)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AuthSession;

    #[test]
    fn refresh_url_is_built_from_frontend_origin() {
        assert_eq!(
            AuthSession::new("http://localhost:3000").refresh_url(),
            "http://localhost:3000/auth/token"
        );
        assert_eq!(
            AuthSession::new("https://app.example.com/").refresh_url(),
            "https://app.example.com/auth/token"
        );
    }

    #[test]
    fn debug_redacts_cookies() {
        let debug = format!("{:?}", AuthSession::new("http://localhost:3000"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("/auth/token"));
    }
}
