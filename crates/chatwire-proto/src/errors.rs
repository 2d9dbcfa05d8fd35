//! Decode errors for inbound frames.
//!
//! A decode failure is not fatal to the session: the chat stream may deliver
//! plain text, which the session layer renders as an anonymous message entry.
//! The error type exists so that the degrade decision is taken exactly once,
//! above this crate.

use thiserror::Error;

/// An inbound payload that could not be decoded as a tagged frame.
///
/// Carries the underlying JSON error for diagnostics; the payload itself is
/// still available to the caller, which is what the degrade path renders.
#[derive(Debug, Error)]
#[error("payload is not a tagged frame: {source}")]
pub struct DecodeError {
    #[from]
    source: serde_json::Error,
}

#[cfg(test)]
mod tests {
    use crate::ServerFrame;

    #[test]
    fn decode_error_is_displayable() {
        let err = match ServerFrame::decode("not json") {
            Err(e) => e,
            Ok(frame) => unreachable!("plain text decoded as {frame:?}"),
        };

        assert!(err.to_string().contains("not a tagged frame"));
    }
}
