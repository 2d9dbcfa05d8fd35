//! Terminal UI for the chatwire chat client.
//!
//! Thin front end over the pure state machines: [`chatwire_app::App`] for
//! screens and the chat list, [`chatwire_client::Session`] (through the
//! bridge) for the transcript. The [`runtime::Runtime`] owns the event loop
//! and all I/O: terminal events, HTTP calls, the WebSocket, and reconnect
//! timers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod input;
pub mod runtime;
pub mod ui;
