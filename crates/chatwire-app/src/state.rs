//! Observable application state types.

/// Top-level screen the UI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Login / registration form.
    Login,
    /// Chat list plus the transcript of the selected chat.
    Chats,
}
