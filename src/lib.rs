//! `backend-http` is an async HTTP client for a cookie-authenticated backend API.
//!
//! Every call goes through [`BackendClient::request`], which:
//! - sends `backend_api_url + path` with credentials included
//! - turns `{"detail": ...}` error bodies into [`ServerError`] values
//! - reports unreachable backends as [`BackendError::NoConnection`]
//! - on a 401, refreshes the session through `/auth/token` and retries once
//!   (when [`ClientOptions::reauthenticate`] is set)

mod client;
mod error;
mod handler;
mod options;
mod request;
mod retry;
mod session;
mod wire;

pub use client::BackendClient;
pub use error::{BackendError, ServerError};
pub use handler::{DetailErrorHandler, ErrorHandler, Rejection};
pub use options::{ClientOptions, DEFAULT_BACKEND_API_URL, DEFAULT_FRONTEND_URL};
pub use request::{Credentials, RequestOptions};
pub use session::{AuthSession, TOKEN_REFRESH_PATH};

pub use reqwest::{header, Method, Response, StatusCode, Url};

pub type Result<T> = std::result::Result<T, BackendError>;
