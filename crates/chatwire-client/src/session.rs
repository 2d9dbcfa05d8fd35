//! Session state machine.
//!
//! Owns one streaming connection bound to the currently selected
//! conversation, the transcript derived from inbound frames, and the
//! fixed-delay reconnect loop. Pure state machine: events in, actions out,
//! no I/O.
//!
//! # State Machine
//!
//! ```text
//!            select                Opened
//! ┌──────┐ ──────────> ┌────────────┐ ──────> ┌──────┐
//! │ Idle │             │ Connecting │         │ Open │
//! └──────┘ <────────── └────────────┘         └──────┘
//!    ^       clear /         ^                   │
//!    │       no token        │ RetryElapsed      │ Closed (unexpected)
//!    │                       │                   v
//!    │       clear      ┌────────────────┐ <────┘
//!    └───────────────── │ RetryScheduled │
//!                       └────────────────┘
//! ```
//!
//! A deliberate teardown (new selection, deselect, logout) bumps the
//! connection generation before anything else, so every event still in
//! flight from the old connection — including its close — fails the
//! generation guard and cannot schedule a reconnect.

use std::time::Duration;

use chatwire_proto::ServerFrame;

use crate::{
    credentials::CredentialSource,
    error::SessionError,
    event::{SessionAction, SessionEvent},
};

/// Delay before the single reconnect attempt after an unexpected close.
///
/// Fixed, uncapped, no backoff growth: every unexpected close schedules
/// exactly one more retry at this interval.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Connection state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection and none pending.
    Idle,
    /// Connect requested, waiting for the transport to open.
    Connecting,
    /// Transport open; sends are accepted.
    Open,
    /// Unexpected close observed; one reconnect is scheduled.
    RetryScheduled,
}

/// Classification of a transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Chat content from a participant.
    Message {
        /// Sender name. `None` for payloads degraded from undecodable text.
        username: Option<String>,
        /// Whether the sender is the session's own identity.
        own: bool,
    },
    /// Transient status line; at most one lives in the transcript at a time.
    System,
    /// Error reported by the server or synthesized locally.
    Error,
}

/// One rendered line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Entry classification.
    pub kind: EntryKind,
    /// Entry text.
    pub content: String,
    /// RFC 3339 timestamp, when the frame carried one.
    pub timestamp: Option<String>,
}

impl LogEntry {
    /// True for the transcript's (single) system entry.
    pub fn is_system(&self) -> bool {
        self.kind == EntryKind::System
    }

    /// True for error entries.
    pub fn is_error(&self) -> bool {
        self.kind == EntryKind::Error
    }

    fn local_error(error: &SessionError) -> Self {
        Self { kind: EntryKind::Error, content: error.to_string(), timestamp: None }
    }
}

/// Session bound to at most one conversation at a time.
///
/// Generic over the credential source so tests inject fixed credentials and
/// production reads the shared store. Credentials are re-read on every
/// connection attempt; a token rotated between attempts is picked up
/// transparently.
#[derive(Debug)]
pub struct Session<C: CredentialSource> {
    /// Credential lookup, consulted at each open.
    credentials: C,
    /// Socket endpoint base from configuration. `None` until resolved.
    endpoint: Option<String>,
    /// Currently desired conversation. `None` when deselected.
    conversation: Option<String>,
    /// Connection state.
    state: ConnectionState,
    /// Monotonic connection generation; bumped on every connect attempt and
    /// every deliberate teardown.
    generation: u64,
    /// Own identity captured from the credential at open time.
    username: Option<String>,
    /// Ordered transcript for the current conversation.
    log: Vec<LogEntry>,
}

impl<C: CredentialSource> Session<C> {
    /// Create an idle session reading credentials from `credentials`.
    pub fn new(credentials: C) -> Self {
        Self {
            credentials,
            endpoint: None,
            conversation: None,
            state: ConnectionState::Idle,
            generation: 0,
            username: None,
            log: Vec::new(),
        }
    }

    /// Transcript of the current conversation, oldest first.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Whether the connection is open.
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Currently selected conversation identifier.
    pub fn conversation(&self) -> Option<&str> {
        self.conversation.as_deref()
    }

    /// Process an event and return actions for the caller to execute.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionAction> {
        match event {
            SessionEvent::EndpointResolved { base } => self.handle_endpoint_resolved(base),
            SessionEvent::ConversationSelected { conversation_id } => {
                self.handle_selected(conversation_id)
            },
            SessionEvent::ConversationCleared => self.handle_cleared(),
            SessionEvent::Opened { generation } => self.handle_opened(generation),
            SessionEvent::FrameReceived { generation, payload } => {
                self.handle_frame(generation, &payload);
                Vec::new()
            },
            SessionEvent::TransportErrored { generation, detail } => {
                self.handle_transport_error(generation, detail);
                Vec::new()
            },
            SessionEvent::Closed { generation, code, reason } => {
                self.handle_closed(generation, code, reason)
            },
            SessionEvent::RetryElapsed { generation } => self.handle_retry(generation),
            SessionEvent::InputSubmitted { text } => self.handle_input(&text),
            SessionEvent::SendFailed { generation } => {
                if generation == self.generation {
                    self.push_error(&SessionError::SendFailed);
                }
                Vec::new()
            },
        }
    }

    fn handle_endpoint_resolved(&mut self, base: String) -> Vec<SessionAction> {
        self.endpoint = Some(base);

        // A conversation selected before the endpoint resolved is still
        // waiting to open.
        if self.conversation.is_some() && self.state == ConnectionState::Idle {
            return self.try_open();
        }
        Vec::new()
    }

    fn handle_selected(&mut self, conversation_id: String) -> Vec<SessionAction> {
        let mut actions = self.teardown();
        self.conversation = Some(conversation_id);
        self.log.clear();
        actions.extend(self.try_open());
        actions
    }

    fn handle_cleared(&mut self) -> Vec<SessionAction> {
        let actions = self.teardown();
        self.conversation = None;
        self.log.clear();
        actions
    }

    fn handle_opened(&mut self, generation: u64) -> Vec<SessionAction> {
        if generation != self.generation || self.state != ConnectionState::Connecting {
            tracing::debug!(generation, current = self.generation, "discarding stale open");
            return Vec::new();
        }

        tracing::info!(conversation = ?self.conversation, "connected to chat");
        self.state = ConnectionState::Open;
        Vec::new()
    }

    fn handle_frame(&mut self, generation: u64, payload: &str) {
        if generation != self.generation || self.state != ConnectionState::Open {
            tracing::debug!(generation, current = self.generation, "discarding stale frame");
            return;
        }

        self.dispatch(payload);
    }

    fn handle_transport_error(&mut self, generation: u64, detail: String) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "discarding stale error");
            return;
        }

        tracing::error!(%detail, "transport error");
        self.push_error(&SessionError::Transport(detail));
    }

    fn handle_closed(
        &mut self,
        generation: u64,
        code: Option<u16>,
        reason: Option<String>,
    ) -> Vec<SessionAction> {
        if generation != self.generation
            || !matches!(self.state, ConnectionState::Connecting | ConnectionState::Open)
        {
            tracing::debug!(generation, current = self.generation, "discarding stale close");
            return Vec::new();
        }

        let code_text = code.map_or_else(|| "unknown".to_string(), |c| c.to_string());
        let reason_text = reason.unwrap_or_else(|| "No reason provided".to_string());
        tracing::warn!(code = %code_text, reason = %reason_text, "connection closed unexpectedly");

        self.push_system(format!(
            "Disconnected from chat (Code: {code_text}). {reason_text}. Attempting to reconnect..."
        ));

        self.state = ConnectionState::RetryScheduled;
        vec![SessionAction::ScheduleRetry { generation: self.generation, delay: RECONNECT_DELAY }]
    }

    fn handle_retry(&mut self, generation: u64) -> Vec<SessionAction> {
        if generation != self.generation || self.state != ConnectionState::RetryScheduled {
            tracing::debug!(generation, current = self.generation, "discarding stale retry");
            return Vec::new();
        }

        tracing::info!(conversation = ?self.conversation, "attempting to reconnect");
        self.try_open()
    }

    fn handle_input(&mut self, text: &str) -> Vec<SessionAction> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        if self.state != ConnectionState::Open {
            self.push_error(&SessionError::NotConnected);
            return Vec::new();
        }

        vec![SessionAction::SendText { text: trimmed.to_string(), generation: self.generation }]
    }

    /// Release the current connection, if any, and invalidate everything
    /// still in flight from it.
    fn teardown(&mut self) -> Vec<SessionAction> {
        let mut actions = Vec::new();
        if self.state != ConnectionState::Idle {
            actions.push(SessionAction::Disconnect { generation: self.generation });
        }

        // Invalidates stale frames, closes, and pending retry timers even
        // when no connection is currently live.
        self.generation += 1;
        self.state = ConnectionState::Idle;
        self.username = None;
        actions
    }

    /// Open a connection if both the endpoint and a conversation are known.
    ///
    /// Reads the credential store fresh; a missing token fails this attempt
    /// locally with a single error entry and no connect action.
    fn try_open(&mut self) -> Vec<SessionAction> {
        let (Some(endpoint), Some(conversation)) =
            (self.endpoint.clone(), self.conversation.clone())
        else {
            return Vec::new();
        };

        let Some(credential) = self.credentials.credential() else {
            tracing::error!("no token in credential store");
            self.push_error(&SessionError::AuthenticationMissing);
            self.state = ConnectionState::Idle;
            return Vec::new();
        };

        self.username = Some(credential.username);
        self.generation += 1;
        self.state = ConnectionState::Connecting;

        let url = format!(
            "{endpoint}/chat/ws/{conversation}?token={}",
            urlencoding::encode(&credential.token)
        );
        vec![SessionAction::Connect { url, generation: self.generation }]
    }

    /// Classify one inbound payload and fold it into the transcript.
    fn dispatch(&mut self, payload: &str) {
        match ServerFrame::decode(payload) {
            Ok(ServerFrame::Message { username, content, timestamp }) => {
                let own = self.username.as_deref() == Some(username.as_str());
                self.log.push(LogEntry {
                    kind: EntryKind::Message { username: Some(username), own },
                    content,
                    timestamp,
                });
            },
            Ok(ServerFrame::System { content, timestamp }) => {
                self.log.retain(|entry| !entry.is_system());
                self.log.push(LogEntry { kind: EntryKind::System, content, timestamp });
            },
            Ok(ServerFrame::Error { content, timestamp }) => {
                self.log.push(LogEntry { kind: EntryKind::Error, content, timestamp });
            },
            Ok(ServerFrame::Unknown) => {
                tracing::warn!(payload, "ignoring frame with unknown type");
            },
            Err(error) => {
                // Degrade rather than drop: render the raw payload as an
                // anonymous message.
                tracing::warn!(%error, "non-frame payload, rendering as plain message");
                self.log.push(LogEntry {
                    kind: EntryKind::Message { username: None, own: false },
                    content: payload.to_string(),
                    timestamp: None,
                });
            },
        }
    }

    /// Append a system entry, superseding any previous one.
    fn push_system(&mut self, content: String) {
        self.log.retain(|entry| !entry.is_system());
        self.log.push(LogEntry { kind: EntryKind::System, content, timestamp: None });
    }

    fn push_error(&mut self, error: &SessionError) {
        self.log.push(LogEntry::local_error(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{Credential, SharedCredentials};

    /// Fixed credential source for driving the state machine directly.
    #[derive(Clone)]
    struct FixedCredentials(Option<Credential>);

    impl CredentialSource for FixedCredentials {
        fn credential(&self) -> Option<Credential> {
            self.0.clone()
        }
    }

    fn session_for(username: &str) -> Session<FixedCredentials> {
        Session::new(FixedCredentials(Some(Credential::new("jwt-token", username))))
    }

    /// Resolve the endpoint, select `conversation`, and return the generation
    /// of the resulting connect action.
    fn select(session: &mut Session<impl CredentialSource>, conversation: &str) -> u64 {
        let _ = session.handle(SessionEvent::EndpointResolved {
            base: "ws://localhost:8081".to_string(),
        });
        let actions = session.handle(SessionEvent::ConversationSelected {
            conversation_id: conversation.to_string(),
        });

        match actions.as_slice() {
            [SessionAction::Connect { generation, .. }] => *generation,
            [SessionAction::Disconnect { .. }, SessionAction::Connect { generation, .. }] => {
                *generation
            },
            other => unreachable!("selection did not connect: {other:?}"),
        }
    }

    fn open(session: &mut Session<impl CredentialSource>, conversation: &str) -> u64 {
        let generation = select(session, conversation);
        let _ = session.handle(SessionEvent::Opened { generation });
        generation
    }

    fn receive(session: &mut Session<impl CredentialSource>, generation: u64, payload: &str) {
        let _ = session.handle(SessionEvent::FrameReceived {
            generation,
            payload: payload.to_string(),
        });
    }

    #[test]
    fn selection_clears_log_before_new_entries() {
        let mut session = session_for("alice");
        let generation = open(&mut session, "chat-1");
        receive(&mut session, generation, r#"{"type":"message","username":"bob","content":"hi"}"#);
        assert_eq!(session.log().len(), 1);

        let next = session.handle(SessionEvent::ConversationSelected {
            conversation_id: "chat-2".to_string(),
        });

        // Old connection released, log empty before anything from chat-2.
        assert!(matches!(next.first(), Some(SessionAction::Disconnect { .. })));
        assert!(session.log().is_empty());
        assert_eq!(session.conversation(), Some("chat-2"));

        // Frames from the superseded connection are discarded.
        receive(&mut session, generation, r#"{"type":"message","username":"bob","content":"late"}"#);
        assert!(session.log().is_empty());
    }

    #[test]
    fn at_most_one_system_entry_and_it_is_the_latest() {
        let mut session = session_for("alice");
        let generation = open(&mut session, "chat-1");

        receive(&mut session, generation, r#"{"type":"system","content":"Connected to chat"}"#);
        receive(&mut session, generation, r#"{"type":"message","username":"bob","content":"hi"}"#);
        receive(&mut session, generation, r#"{"type":"system","content":"bob disconnected"}"#);

        let systems: Vec<_> = session.log().iter().filter(|e| e.is_system()).collect();
        assert_eq!(systems.len(), 1);
        assert_eq!(systems[0].content, "bob disconnected");

        // The replacement does not disturb other entries.
        assert_eq!(session.log().len(), 2);
    }

    #[test]
    fn empty_input_is_a_silent_no_op() {
        let mut session = session_for("alice");
        let _ = open(&mut session, "chat-1");
        let before = session.log().len();

        assert!(session.handle(SessionEvent::InputSubmitted { text: String::new() }).is_empty());
        assert!(
            session
                .handle(SessionEvent::InputSubmitted { text: "   ".to_string() })
                .is_empty()
        );
        assert_eq!(session.log().len(), before);
    }

    #[test]
    fn send_while_not_open_produces_one_error_and_no_transport_call() {
        let mut session = session_for("alice");
        let _ = select(&mut session, "chat-1");
        // Still Connecting: Opened never delivered.

        let actions = session.handle(SessionEvent::InputSubmitted { text: "hi".to_string() });

        assert!(actions.is_empty());
        let errors: Vec<_> = session.log().iter().filter(|e| e.is_error()).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].content, SessionError::NotConnected.to_string());
    }

    #[test]
    fn send_trims_text() {
        let mut session = session_for("alice");
        let generation = open(&mut session, "chat-1");

        let actions = session.handle(SessionEvent::InputSubmitted { text: "  hi  ".to_string() });

        assert_eq!(
            actions,
            vec![SessionAction::SendText { text: "hi".to_string(), generation }]
        );
    }

    #[test]
    fn missing_token_fails_locally_without_connecting() {
        let mut session = Session::new(FixedCredentials(None));
        let _ = session.handle(SessionEvent::EndpointResolved {
            base: "ws://localhost:8081".to_string(),
        });

        let actions = session.handle(SessionEvent::ConversationSelected {
            conversation_id: "chat-1".to_string(),
        });

        assert!(actions.is_empty());
        assert_eq!(session.connection_state(), ConnectionState::Idle);
        let errors: Vec<_> = session.log().iter().filter(|e| e.is_error()).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].content, SessionError::AuthenticationMissing.to_string());
    }

    #[test]
    fn unexpected_close_schedules_exactly_one_retry() {
        let mut session = session_for("alice");
        let generation = open(&mut session, "chat-1");

        let actions = session.handle(SessionEvent::Closed { generation, code: Some(1006), reason: None });

        assert_eq!(
            actions,
            vec![SessionAction::ScheduleRetry { generation, delay: RECONNECT_DELAY }]
        );
        assert_eq!(session.connection_state(), ConnectionState::RetryScheduled);

        // The close is surfaced in the transcript, not silently dropped.
        assert!(session.log().iter().any(|e| e.is_system() && e.content.contains("1006")));

        // A duplicate close for the same generation schedules nothing more.
        assert!(
            session
                .handle(SessionEvent::Closed { generation, code: Some(1006), reason: None })
                .is_empty()
        );
    }

    #[test]
    fn retry_reconnects_to_the_same_conversation() {
        let mut session = session_for("alice");
        let generation = open(&mut session, "chat-1");
        let _ = session.handle(SessionEvent::Closed { generation, code: None, reason: None });

        let actions = session.handle(SessionEvent::RetryElapsed { generation });

        match actions.as_slice() {
            [SessionAction::Connect { url, generation: next }] => {
                assert!(url.contains("/chat/ws/chat-1?token="));
                assert!(*next > generation);
            },
            other => unreachable!("retry did not reconnect: {other:?}"),
        }
    }

    #[test]
    fn conversation_change_invalidates_pending_retry() {
        let mut session = session_for("alice");
        let generation = open(&mut session, "chat-1");
        let _ = session.handle(SessionEvent::Closed { generation, code: None, reason: None });

        // New selection before the timer fires.
        let _ = session.handle(SessionEvent::ConversationSelected {
            conversation_id: "chat-2".to_string(),
        });

        // The stale timer must not open anything for chat-1.
        let actions = session.handle(SessionEvent::RetryElapsed { generation });
        assert!(actions.is_empty());
    }

    #[test]
    fn retry_rereads_rotated_token() {
        let store = SharedCredentials::new();
        store.store(Credential::new("token-old", "alice"));
        let mut session = Session::new(store.clone());

        let generation = open(&mut session, "chat-1");
        let _ = session.handle(SessionEvent::Closed { generation, code: None, reason: None });

        store.store(Credential::new("token-new", "alice"));
        let actions = session.handle(SessionEvent::RetryElapsed { generation });

        match actions.as_slice() {
            [SessionAction::Connect { url, .. }] => assert!(url.ends_with("token=token-new")),
            other => unreachable!("retry did not reconnect: {other:?}"),
        }
    }

    #[test]
    fn own_message_flag_follows_identity() {
        let mut session = session_for("alice");
        let generation = open(&mut session, "chat-1");

        receive(&mut session, generation, r#"{"type":"message","username":"alice","content":"hi"}"#);
        receive(&mut session, generation, r#"{"type":"message","username":"bob","content":"yo"}"#);

        let owns: Vec<bool> = session
            .log()
            .iter()
            .filter_map(|e| match &e.kind {
                EntryKind::Message { own, .. } => Some(*own),
                _ => None,
            })
            .collect();
        assert_eq!(owns, vec![true, false]);
    }

    #[test]
    fn undecodable_payload_degrades_to_anonymous_message() {
        let mut session = session_for("alice");
        let generation = open(&mut session, "chat-1");

        receive(&mut session, generation, "plain text");

        assert_eq!(
            session.log(),
            &[LogEntry {
                kind: EntryKind::Message { username: None, own: false },
                content: "plain text".to_string(),
                timestamp: None,
            }]
        );
    }

    #[test]
    fn deliberate_teardown_never_schedules_a_retry() {
        let mut session = session_for("alice");
        let generation = open(&mut session, "chat-1");

        let actions = session.handle(SessionEvent::ConversationCleared);
        assert_eq!(actions, vec![SessionAction::Disconnect { generation }]);

        // The transport close still fires after the teardown; it must be inert.
        let actions = session.handle(SessionEvent::Closed {
            generation,
            code: Some(1000),
            reason: Some("going away".to_string()),
        });
        assert!(actions.is_empty());
        assert_eq!(session.connection_state(), ConnectionState::Idle);
    }

    #[test]
    fn unknown_frame_kind_is_ignored() {
        let mut session = session_for("alice");
        let generation = open(&mut session, "chat-1");

        receive(&mut session, generation, r#"{"type":"presence","content":"typing"}"#);

        assert!(session.log().is_empty());
    }

    #[test]
    fn token_is_url_encoded() {
        let mut session =
            Session::new(FixedCredentials(Some(Credential::new("a+b/c=", "alice"))));
        let _ = session.handle(SessionEvent::EndpointResolved {
            base: "ws://localhost:8081".to_string(),
        });

        let actions = session.handle(SessionEvent::ConversationSelected {
            conversation_id: "chat-1".to_string(),
        });

        match actions.as_slice() {
            [SessionAction::Connect { url, .. }] => {
                assert_eq!(url, "ws://localhost:8081/chat/ws/chat-1?token=a%2Bb%2Fc%3D");
            },
            other => unreachable!("selection did not connect: {other:?}"),
        }
    }

    #[test]
    fn selection_before_endpoint_defers_the_open() {
        let mut session = session_for("alice");

        let actions = session.handle(SessionEvent::ConversationSelected {
            conversation_id: "chat-1".to_string(),
        });
        assert!(actions.is_empty());
        assert_eq!(session.connection_state(), ConnectionState::Idle);

        let actions = session.handle(SessionEvent::EndpointResolved {
            base: "ws://localhost:8081".to_string(),
        });
        assert!(matches!(actions.as_slice(), [SessionAction::Connect { .. }]));
    }

    #[test]
    fn transport_error_is_surfaced_once() {
        let mut session = session_for("alice");
        let generation = select(&mut session, "chat-1");

        let _ = session.handle(SessionEvent::TransportErrored {
            generation,
            detail: "connection refused".to_string(),
        });

        let errors: Vec<_> = session.log().iter().filter(|e| e.is_error()).collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].content.contains("connection refused"));

        // A stale error from a previous generation is discarded.
        let _ = session.handle(SessionEvent::TransportErrored {
            generation: generation - 1,
            detail: "old".to_string(),
        });
        assert_eq!(session.log().iter().filter(|e| e.is_error()).count(), 1);
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        #[derive(Debug, Clone)]
        enum Inbound {
            Message { username: String, content: String },
            System { content: String },
            Error { content: String },
            Plain { content: String },
        }

        impl Inbound {
            fn payload(&self) -> String {
                match self {
                    Inbound::Message { username, content } => format!(
                        r#"{{"type":"message","username":{},"content":{}}}"#,
                        serde_json::Value::from(username.as_str()),
                        serde_json::Value::from(content.as_str()),
                    ),
                    Inbound::System { content } => format!(
                        r#"{{"type":"system","content":{}}}"#,
                        serde_json::Value::from(content.as_str()),
                    ),
                    Inbound::Error { content } => format!(
                        r#"{{"type":"error","content":{}}}"#,
                        serde_json::Value::from(content.as_str()),
                    ),
                    Inbound::Plain { content } => content.clone(),
                }
            }
        }

        fn arbitrary_inbound() -> impl Strategy<Value = Inbound> {
            prop_oneof![
                ("[a-z]{1,8}", ".{0,16}").prop_map(|(username, content)| Inbound::Message {
                    username,
                    content
                }),
                ".{0,16}".prop_map(|content| Inbound::System { content }),
                ".{0,16}".prop_map(|content| Inbound::Error { content }),
                // Guaranteed undecodable: no leading brace.
                "[a-z ]{1,16}".prop_map(|content| Inbound::Plain { content }),
            ]
        }

        proptest! {
            /// For any inbound sequence the transcript holds at most one
            /// system entry, and it is the most recent one received.
            #[test]
            fn system_entries_never_accumulate(
                frames in proptest::collection::vec(arbitrary_inbound(), 0..32)
            ) {
                let mut session = session_for("alice");
                let generation = open(&mut session, "chat-1");

                let mut last_system = None;
                for frame in &frames {
                    receive(&mut session, generation, &frame.payload());
                    if let Inbound::System { content } = frame {
                        last_system = Some(content.clone());
                    }
                }

                let systems: Vec<_> =
                    session.log().iter().filter(|e| e.is_system()).collect();
                assert!(systems.len() <= 1);
                assert_eq!(systems.first().map(|e| e.content.clone()), last_system);
            }

            /// Non-system entries are append-only: system replacement never
            /// reorders or removes them.
            #[test]
            fn non_system_entries_are_append_only(
                frames in proptest::collection::vec(arbitrary_inbound(), 0..32)
            ) {
                let mut session = session_for("alice");
                let generation = open(&mut session, "chat-1");

                let mut expected = Vec::new();
                for frame in &frames {
                    receive(&mut session, generation, &frame.payload());
                    match frame {
                        Inbound::Message { content, .. }
                        | Inbound::Error { content }
                        | Inbound::Plain { content } => expected.push(content.clone()),
                        Inbound::System { .. } => {},
                    }
                }

                let observed: Vec<_> = session
                    .log()
                    .iter()
                    .filter(|e| !e.is_system())
                    .map(|e| e.content.clone())
                    .collect();
                assert_eq!(observed, expected);
            }
        }
    }
}
