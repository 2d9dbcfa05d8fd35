//! Session bridge.
//!
//! Couples the App layer to the [`Session`] state machine and accumulates
//! the session's actions for the runtime to execute in its next I/O cycle,
//! keeping the UI layer decoupled from connection mechanics.

use chatwire_client::{CredentialSource, Session, SessionAction, SessionEvent};

/// Bridge between the App and the streaming session.
///
/// Holds the session state machine and buffers outgoing actions (connects,
/// sends, retry timers) until the runtime drains them with
/// [`Bridge::take_outgoing`].
#[derive(Debug)]
pub struct Bridge<C: CredentialSource> {
    session: Session<C>,
    /// Actions pending execution by the runtime.
    outgoing: Vec<SessionAction>,
}

impl<C: CredentialSource> Bridge<C> {
    /// Create a bridge around a fresh session reading `credentials`.
    pub fn new(credentials: C) -> Self {
        Self { session: Session::new(credentials), outgoing: Vec::new() }
    }

    /// The underlying session, for rendering the transcript and
    /// connectivity flag.
    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    /// Feed the resolved socket endpoint base into the session.
    pub fn endpoint_resolved(&mut self, base: String) {
        self.feed(SessionEvent::EndpointResolved { base });
    }

    /// Bind the session to a conversation (tears down any previous one).
    pub fn select_conversation(&mut self, conversation_id: String) {
        self.feed(SessionEvent::ConversationSelected { conversation_id });
    }

    /// Deliberately tear the session down (deselect or logout).
    pub fn clear_conversation(&mut self) {
        self.feed(SessionEvent::ConversationCleared);
    }

    /// Submit user input for sending.
    pub fn submit_input(&mut self, text: String) {
        self.feed(SessionEvent::InputSubmitted { text });
    }

    /// Deliver a transport lifecycle event (open, frame, error, close, send
    /// failure) produced by the socket task.
    pub fn transport_event(&mut self, event: SessionEvent) {
        self.feed(event);
    }

    /// Deliver a fired retry timer.
    pub fn retry_elapsed(&mut self, generation: u64) {
        self.feed(SessionEvent::RetryElapsed { generation });
    }

    /// Take all pending session actions.
    pub fn take_outgoing(&mut self) -> Vec<SessionAction> {
        std::mem::take(&mut self.outgoing)
    }

    fn feed(&mut self, event: SessionEvent) {
        let actions = self.session.handle(event);
        self.outgoing.extend(actions);
    }
}

#[cfg(test)]
mod tests {
    use chatwire_client::{Credential, SharedCredentials};

    use super::*;

    fn bridge() -> Bridge<SharedCredentials> {
        let credentials = SharedCredentials::new();
        credentials.store(Credential::new("jwt", "alice"));
        let mut bridge = Bridge::new(credentials);
        bridge.endpoint_resolved("ws://localhost:8081".to_string());
        bridge
    }

    #[test]
    fn selection_buffers_a_connect() {
        let mut bridge = bridge();

        bridge.select_conversation("c1".to_string());

        let actions = bridge.take_outgoing();
        assert!(matches!(actions.as_slice(), [SessionAction::Connect { .. }]));
        assert!(bridge.take_outgoing().is_empty());
    }

    #[test]
    fn input_buffers_a_send_once_open() {
        let mut bridge = bridge();
        bridge.select_conversation("c1".to_string());
        let generation = match bridge.take_outgoing().as_slice() {
            [SessionAction::Connect { generation, .. }] => *generation,
            other => unreachable!("selection did not connect: {other:?}"),
        };
        bridge.transport_event(SessionEvent::Opened { generation });

        bridge.submit_input("hello".to_string());

        assert_eq!(
            bridge.take_outgoing(),
            vec![SessionAction::SendText { text: "hello".to_string(), generation }]
        );
    }

    #[test]
    fn unexpected_close_buffers_a_retry_timer() {
        let mut bridge = bridge();
        bridge.select_conversation("c1".to_string());
        let generation = match bridge.take_outgoing().as_slice() {
            [SessionAction::Connect { generation, .. }] => *generation,
            other => unreachable!("selection did not connect: {other:?}"),
        };
        bridge.transport_event(SessionEvent::Opened { generation });

        bridge.transport_event(SessionEvent::Closed { generation, code: None, reason: None });

        assert!(matches!(
            bridge.take_outgoing().as_slice(),
            [SessionAction::ScheduleRetry { .. }]
        ));

        bridge.retry_elapsed(generation);
        assert!(matches!(bridge.take_outgoing().as_slice(), [SessionAction::Connect { .. }]));
    }
}
