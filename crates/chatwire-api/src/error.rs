//! API error types.

use thiserror::Error;

/// Errors from the REST client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not complete (DNS, connect, TLS, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Login was rejected by the server.
    #[error("Invalid username or password.")]
    InvalidCredentials,

    /// The server answered with a non-success status.
    #[error("server returned {status} for {endpoint}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Endpoint path the request was made to.
        endpoint: String,
    },
}
