//! Inbound frame type.
//!
//! Every frame the server pushes over the stream is a JSON object whose
//! `type` field selects the variant. Timestamps are RFC 3339 strings produced
//! by the server clock; they are kept raw here and parsed only where they are
//! displayed, so a malformed timestamp degrades one rendering instead of
//! rejecting the whole frame.

use serde::Deserialize;

use crate::errors::DecodeError;

/// A frame received from the server on the streaming connection.
///
/// # Invariants
///
/// - Exhaustiveness: every declared `type` tag maps to exactly one variant;
///   tags this client does not understand decode to [`ServerFrame::Unknown`]
///   instead of failing, so protocol additions never break the session.
/// - Optional timestamps: `error` frames may omit the field, and tolerating
///   its absence on the other variants costs nothing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerFrame {
    /// Chat content from a participant (possibly ourselves, echoed back).
    Message {
        /// Name of the participant who sent the message.
        username: String,
        /// Message text.
        content: String,
        /// RFC 3339 send time.
        #[serde(default)]
        timestamp: Option<String>,
    },

    /// Connection or session status, e.g. "Connected to chat".
    ///
    /// The transcript holds at most one system entry at a time; each new one
    /// supersedes the previous (enforced by the session layer).
    System {
        /// Status text.
        content: String,
        /// RFC 3339 emit time.
        #[serde(default)]
        timestamp: Option<String>,
    },

    /// Delivery or protocol error reported by the server.
    Error {
        /// Error text.
        content: String,
        /// RFC 3339 emit time. May be absent.
        #[serde(default)]
        timestamp: Option<String>,
    },

    /// A tag this client does not understand. Ignored, diagnostic only.
    #[serde(other)]
    Unknown,
}

impl ServerFrame {
    /// Decode a frame from the raw text payload of the stream.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the payload is not JSON or not an object
    /// with a `type` tag. Callers degrade such payloads to plain message
    /// entries rather than dropping them.
    pub fn decode(payload: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_message_frame() {
        let frame = ServerFrame::decode(
            r#"{"type":"message","username":"alice","content":"hi","timestamp":"2025-03-01T12:00:00Z"}"#,
        );

        assert_eq!(
            frame.ok(),
            Some(ServerFrame::Message {
                username: "alice".to_string(),
                content: "hi".to_string(),
                timestamp: Some("2025-03-01T12:00:00Z".to_string()),
            })
        );
    }

    #[test]
    fn decodes_system_frame() {
        let frame = ServerFrame::decode(
            r#"{"type":"system","content":"Connected to chat","timestamp":"2025-03-01T12:00:00Z"}"#,
        );

        assert!(matches!(frame, Ok(ServerFrame::System { .. })));
    }

    #[test]
    fn decodes_error_frame_without_timestamp() {
        let frame = ServerFrame::decode(r#"{"type":"error","content":"Failed to process message"}"#);

        assert_eq!(
            frame.ok(),
            Some(ServerFrame::Error {
                content: "Failed to process message".to_string(),
                timestamp: None,
            })
        );
    }

    #[test]
    fn unknown_tag_decodes_to_unknown_variant() {
        let frame = ServerFrame::decode(r#"{"type":"presence","content":"alice is typing"}"#);

        assert_eq!(frame.ok(), Some(ServerFrame::Unknown));
    }

    #[test]
    fn plain_text_is_a_decode_error() {
        assert!(ServerFrame::decode("just some text").is_err());
    }

    #[test]
    fn json_without_tag_is_a_decode_error() {
        assert!(ServerFrame::decode(r#"{"content":"no type field"}"#).is_err());
    }
}
