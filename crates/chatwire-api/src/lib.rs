//! Typed REST client for the chatwire server API.
//!
//! Covers the endpoints the client consumes: registration and login, the
//! chat list and chat records, participant join/leave, and the configuration
//! endpoint that resolves the socket endpoint base.
//!
//! Login writes the issued token (and the username it was issued for) into
//! the [`SharedCredentials`](chatwire_client::SharedCredentials) store shared
//! with the session manager; logout clears it. Every other request attaches
//! the stored token as a bearer header when one is present.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod error;
mod types;

pub use client::{ApiClient, JoinOutcome};
pub use error::ApiError;
pub use types::{AuthRequest, AuthResponse, ChatRecord, CreateChatRequest, ServerConfig};
