//! Session error taxonomy.
//!
//! Every failure the session can hit is absorbed locally and rendered as an
//! error entry in the transcript; nothing propagates to the caller. The enum
//! exists so the rendering, the state machine, and the tests agree on the
//! cases and the wording the user sees.

use thiserror::Error;

/// Failures surfaced to the transcript as error entries.
///
/// Decode failures are not listed: an undecodable payload degrades to a plain
/// message entry instead of an error. An unexpected close is not an error
/// either; it transitions the session into its retry state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No token in the credential store at connection-open time.
    ///
    /// Fatal to that open attempt only; a later select or retry re-reads the
    /// store and may succeed.
    #[error("Authentication error: no token found")]
    AuthenticationMissing,

    /// Send attempted while the connection is not open.
    ///
    /// The text is not queued or retried.
    #[error("Cannot send message: Connection is not open")]
    NotConnected,

    /// The transport reported an error event.
    #[error("Error connecting to chat. Error details: {0}")]
    Transport(String),

    /// The transport accepted the text but delivery failed.
    #[error("Failed to send message. Please try again.")]
    SendFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_readable() {
        assert_eq!(
            SessionError::AuthenticationMissing.to_string(),
            "Authentication error: no token found"
        );
        assert_eq!(
            SessionError::Transport("connection refused".to_string()).to_string(),
            "Error connecting to chat. Error details: connection refused"
        );
    }
}
