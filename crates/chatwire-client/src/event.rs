//! Session events and actions.

use std::time::Duration;

/// Events the caller feeds into the session.
///
/// The caller is responsible for:
/// - Resolving the socket endpoint base from configuration
/// - Forwarding selection changes from the UI
/// - Running the transport and delivering its lifecycle events
/// - Firing retry timers scheduled by [`SessionAction::ScheduleRetry`]
///
/// Transport-originated events carry the generation handed out with the
/// matching [`SessionAction::Connect`]; the session discards events whose
/// generation is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The socket endpoint base became known (from the config endpoint).
    ///
    /// Opening is deferred until both this and a selected conversation are
    /// available.
    EndpointResolved {
        /// Socket endpoint base, e.g. `ws://chat.example.com:8081`.
        base: String,
    },

    /// The user selected a conversation (possibly the one already active).
    ///
    /// Always tears down any live connection and clears the transcript before
    /// opening against the new identifier.
    ConversationSelected {
        /// Opaque conversation identifier supplied by the host UI.
        conversation_id: String,
    },

    /// The user deselected the conversation or logged out.
    ///
    /// Deliberate teardown: the close of the underlying transport must not
    /// schedule a reconnect.
    ConversationCleared,

    /// The transport finished its handshake and is ready to send.
    Opened {
        /// Generation of the connection that opened.
        generation: u64,
    },

    /// A text payload arrived on the live connection.
    FrameReceived {
        /// Generation of the connection the payload arrived on.
        generation: u64,
        /// Raw text payload, decoded by the session.
        payload: String,
    },

    /// The transport reported an error event.
    ///
    /// The transport emits a matching [`SessionEvent::Closed`] afterwards;
    /// retry scheduling happens there, not here.
    TransportErrored {
        /// Generation of the connection that errored.
        generation: u64,
        /// Human-readable error detail.
        detail: String,
    },

    /// The transport closed.
    ///
    /// With a current generation this is an *unexpected* close (deliberate
    /// teardown bumps the generation first) and schedules one reconnect.
    Closed {
        /// Generation of the connection that closed.
        generation: u64,
        /// Close code, if the peer supplied one.
        code: Option<u16>,
        /// Close reason, if the peer supplied one.
        reason: Option<String>,
    },

    /// A retry timer scheduled by [`SessionAction::ScheduleRetry`] fired.
    RetryElapsed {
        /// Generation the timer was scheduled for.
        generation: u64,
    },

    /// The user submitted text from the input line.
    InputSubmitted {
        /// Raw input text; the session trims it.
        text: String,
    },

    /// A previously accepted [`SessionAction::SendText`] failed in transit.
    SendFailed {
        /// Generation of the connection the send was attempted on.
        generation: u64,
    },
}

/// Actions the session produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Open a streaming connection to `url`.
    ///
    /// The caller must tag every lifecycle event of the resulting connection
    /// with `generation`.
    Connect {
        /// Fully formed socket URL including the encoded token.
        url: String,
        /// Generation identifying this connection attempt.
        generation: u64,
    },

    /// Close the connection with this generation, releasing its resources.
    ///
    /// Closing a connection that already died is a no-op for the caller.
    Disconnect {
        /// Generation of the connection to release.
        generation: u64,
    },

    /// Send trimmed text on the open connection.
    SendText {
        /// Text to send, already trimmed.
        text: String,
        /// Generation of the connection to send on.
        generation: u64,
    },

    /// Arrange for [`SessionEvent::RetryElapsed`] after `delay`.
    ///
    /// The timer itself need not be cancellable; a stale generation at fire
    /// time is discarded by the session.
    ScheduleRetry {
        /// Generation to echo back when the timer fires.
        generation: u64,
        /// Fixed reconnect delay.
        delay: Duration,
    },
}
