//! Actions produced by the App state machine.

/// Instructions for the runtime to execute.
///
/// API-shaped actions are executed as spawned HTTP requests whose outcomes
/// come back as [`crate::AppEvent`]s; session-shaped actions are forwarded to
/// the [`crate::Bridge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Redraw the UI.
    Render,

    /// Exit the application.
    Quit,

    /// POST the login request.
    Login {
        /// Account name.
        username: String,
        /// Account password.
        password: String,
    },

    /// POST the registration request.
    Register {
        /// Account name.
        username: String,
        /// Account password.
        password: String,
    },

    /// Fetch the chat list.
    LoadChats,

    /// Create a chat with this caption.
    CreateChat {
        /// Title of the new chat.
        caption: String,
    },

    /// Join the chat with this identifier.
    JoinChat {
        /// Identifier of the chat to join.
        chat_id: String,
    },

    /// Leave the chat with this identifier.
    LeaveChat {
        /// Identifier of the chat to leave.
        chat_id: String,
    },

    /// Bind the streaming session to this conversation.
    OpenSession {
        /// Conversation identifier (the chat id).
        chat_id: String,
    },

    /// Submit text to the streaming session for sending.
    SendMessage {
        /// Raw input text; the session trims it.
        text: String,
    },

    /// Tear the streaming session down deliberately (no reconnect).
    CloseSession,

    /// Clear the stored credential.
    Logout,
}
