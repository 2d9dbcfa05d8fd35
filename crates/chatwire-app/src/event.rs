//! Application input events.
//!
//! Events originate from two distinct sources:
//! - User interactions (keyboard, resize) and system ticks.
//! - Completions of the asynchronous work the runtime executed on the App's
//!   behalf (auth requests, chat CRUD).

use chatwire_api::ChatRecord;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Login completed; the credential store now holds a token.
    LoggedIn {
        /// Authenticated username.
        username: String,
    },

    /// Registration completed; the user still has to log in.
    RegistrationCompleted,

    /// Login or registration was rejected or failed.
    AuthFailed {
        /// Human-readable reason shown on the form.
        message: String,
    },

    /// The chat list finished loading.
    ChatsLoaded {
        /// Chats the user participates in.
        chats: Vec<ChatRecord>,
    },

    /// A chat was created by us.
    ChatCreated {
        /// The new chat.
        chat: ChatRecord,
    },

    /// We joined a chat (or were already a participant).
    ChatJoined {
        /// The joined chat.
        chat: ChatRecord,
    },

    /// We left a chat.
    ChatLeft {
        /// Identifier of the chat that was left.
        chat_id: String,
    },

    /// An asynchronous operation failed.
    Error {
        /// Error description.
        message: String,
    },
}
