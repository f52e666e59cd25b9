/// Base URL used when `NEXT_PUBLIC_BACKEND_API_URL` is unset or empty.
pub const DEFAULT_BACKEND_API_URL: &str = "http://localhost:8000/api";
/// Origin used when `FRONTEND_URL` is unset or empty.
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Configures the backend origin and the re-authentication behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Base URL every request path is appended to.
    pub backend_api_url: String,
    /// Origin that serves the `/auth/token` refresh route.
    pub frontend_url: String,
    /// Refresh the session and retry once when the backend answers 401.
    pub reauthenticate: bool,
    /// Client-wide timeout in milliseconds. `None` disables the timeout.
    pub timeout_ms: Option<u64>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            backend_api_url: DEFAULT_BACKEND_API_URL.to_owned(),
            frontend_url: DEFAULT_FRONTEND_URL.to_owned(),
            reauthenticate: false,
            timeout_ms: None,
        }
    }
}

impl ClientOptions {
    /// Reads options from the process environment.
    ///
    /// Reads:
    /// - `USE_AUTH0_AUTHORIZATION` — `"true"` (any case) enables retry-on-401
    /// - `NEXT_PUBLIC_BACKEND_API_URL` — backend base URL
    /// - `FRONTEND_URL` — origin serving `/auth/token`
    ///
    /// Unset or empty URLs fall back to their defaults.
    ///
    /// **Not available on `wasm32` targets** — use [`ClientOptions::from_lookup`]
    /// with values handed over from JavaScript instead.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds options from an arbitrary key lookup, with the same keys and
    /// defaults as [`ClientOptions::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let reauthenticate = lookup("USE_AUTH0_AUTHORIZATION")
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));
        let backend_api_url = non_empty(lookup("NEXT_PUBLIC_BACKEND_API_URL"))
            .unwrap_or_else(|| DEFAULT_BACKEND_API_URL.to_owned());
        let frontend_url = non_empty(lookup("FRONTEND_URL"))
            .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_owned());

        Self {
            backend_api_url,
            frontend_url,
            reauthenticate,
            timeout_ms: None,
        }
    }

    pub fn with_reauthenticate(mut self, enabled: bool) -> Self {
        self.reauthenticate = enabled;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
