//! Wire-frame model for the chatwire streaming chat protocol.
//!
//! The streaming connection is asymmetric:
//!
//! - **Inbound** frames are JSON text with a `type` discriminator
//!   (`message`, `system`, `error`). [`ServerFrame`] models them as a closed
//!   tagged union with an explicit [`ServerFrame::Unknown`] variant, so an
//!   unrecognized tag is a visible branch rather than a silent default.
//! - **Outbound** frames are raw trimmed text, not JSON. There is nothing to
//!   model; callers send the string as-is.
//!
//! Decoding never guesses: a payload that is not frame JSON is a
//! [`DecodeError`], and the session layer decides how to degrade.

mod errors;
mod frame;

pub use errors::DecodeError;
pub use frame::ServerFrame;
