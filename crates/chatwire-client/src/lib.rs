//! Client
//!
//! Action-based session state machine for the chatwire streaming protocol.
//! Manages the lifecycle of one streaming connection bound to the currently
//! selected conversation: open, frame dispatch into the transcript,
//! outbound sends, and fixed-delay reconnects after unexpected closes.
//!
//! # Architecture
//!
//! The session is Sans-IO: it receives events ([`SessionEvent`]), processes
//! them through pure state machine logic, and returns actions
//! ([`SessionAction`]) for the caller to execute. Every action and every
//! transport event carries the *generation* of the connection it belongs to,
//! so anything stale — a frame racing a teardown, a reconnect timer for a
//! conversation that is no longer selected — is discarded by a guard check
//! instead of by handler-detachment timing.
//!
//! # Components
//!
//! - [`Session`]: the state machine owning the transcript and connection state
//! - [`SessionEvent`] / [`SessionAction`]: events fed in, actions produced
//! - [`CredentialSource`]: token + identity lookup, re-read on every
//!   connection attempt
//! - [`SessionError`]: failure taxonomy rendered into the transcript
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::ConnectedSocket`]: a live WebSocket bound to one generation
//! - [`transport::connect`]: open a socket and stream its events

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod credentials;
mod error;
mod event;
mod session;

#[cfg(feature = "transport")]
pub mod transport;

pub use credentials::{Credential, CredentialSource, SharedCredentials};
pub use error::SessionError;
pub use event::{SessionAction, SessionEvent};
pub use session::{ConnectionState, EntryKind, LogEntry, RECONNECT_DELAY, Session};
