//! Application state machine.
//!
//! Pure state machine for the interactive state of the client: which screen
//! is showing, the chat list, the selected chat, and the transient status
//! line. It consumes [`AppEvent`] inputs and produces [`AppAction`]
//! instructions for the runtime to execute; the transcript itself lives in
//! the session, reached through the [`crate::Bridge`].

use chatwire_api::ChatRecord;

use crate::{AppAction, AppEvent, Screen};

/// Application state machine.
///
/// No I/O dependencies; fully testable without a terminal or a server.
#[derive(Debug, Clone)]
pub struct App {
    /// Screen currently shown.
    screen: Screen,
    /// Whether the login form is in registration mode.
    register_mode: bool,
    /// An auth request is in flight; the form is locked.
    auth_busy: bool,
    /// Chats the user participates in.
    chats: Vec<ChatRecord>,
    /// Identifier of the selected chat. `None` if nothing is selected.
    selected: Option<String>,
    /// Authenticated username. `None` before login.
    username: Option<String>,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new App on the login screen.
    pub fn new() -> Self {
        Self {
            screen: Screen::Login,
            register_mode: false,
            auth_busy: false,
            chats: Vec::new(),
            selected: None,
            username: None,
            status_message: None,
            terminal_size: (80, 24),
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::LoggedIn { username } => {
                self.auth_busy = false;
                self.screen = Screen::Chats;
                self.status_message = Some(format!("Logged in as {username}"));
                self.username = Some(username);
                vec![AppAction::LoadChats, AppAction::Render]
            },
            AppEvent::RegistrationCompleted => {
                self.auth_busy = false;
                self.register_mode = false;
                self.status_message = Some("Registration successful! Please log in.".to_string());
                vec![AppAction::Render]
            },
            AppEvent::AuthFailed { message } => {
                self.auth_busy = false;
                self.status_message = Some(message);
                vec![AppAction::Render]
            },
            AppEvent::ChatsLoaded { chats } => {
                self.chats = chats;
                vec![AppAction::Render]
            },
            AppEvent::ChatCreated { chat } => {
                self.status_message = Some(format!("Created chat \"{}\"", chat.caption));
                self.chats.push(chat);
                vec![AppAction::Render]
            },
            AppEvent::ChatJoined { chat } => {
                let chat_id = chat.chat_id.clone();
                if !self.chats.iter().any(|c| c.chat_id == chat_id) {
                    self.chats.push(chat);
                }
                // Joining lands the user in the chat immediately.
                self.selected = Some(chat_id.clone());
                vec![AppAction::OpenSession { chat_id }, AppAction::Render]
            },
            AppEvent::ChatLeft { chat_id } => {
                self.chats.retain(|c| c.chat_id != chat_id);
                self.status_message = Some("Left chat".to_string());
                if self.selected.as_deref() == Some(chat_id.as_str()) {
                    self.selected = None;
                    return vec![AppAction::CloseSession, AppAction::Render];
                }
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                tracing::warn!(%message, "operation failed");
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Submit the login form.
    ///
    /// Empty fields are rejected locally without a request.
    pub fn submit_auth(&mut self, username: &str, password: &str) -> Vec<AppAction> {
        if username.is_empty() || password.is_empty() {
            self.status_message = Some("Please fill in both fields.".to_string());
            return vec![AppAction::Render];
        }
        if self.auth_busy {
            return vec![];
        }

        self.auth_busy = true;
        self.status_message =
            Some(if self.register_mode { "Registering..." } else { "Logging in..." }.to_string());

        let action = if self.register_mode {
            AppAction::Register { username: username.to_string(), password: password.to_string() }
        } else {
            AppAction::Login { username: username.to_string(), password: password.to_string() }
        };
        vec![action, AppAction::Render]
    }

    /// Switch the login form between login and registration.
    pub fn toggle_register_mode(&mut self) -> Vec<AppAction> {
        self.register_mode = !self.register_mode;
        self.status_message = None;
        vec![AppAction::Render]
    }

    /// Select a chat from the list, binding the session to it.
    pub fn select_chat(&mut self, chat_id: &str) -> Vec<AppAction> {
        if !self.chats.iter().any(|c| c.chat_id == chat_id) {
            return vec![];
        }
        self.selected = Some(chat_id.to_string());
        vec![AppAction::OpenSession { chat_id: chat_id.to_string() }, AppAction::Render]
    }

    /// Create a new chat.
    pub fn create_chat(&mut self, caption: &str) -> Vec<AppAction> {
        if caption.is_empty() {
            self.status_message = Some("Chat title required".to_string());
            return vec![AppAction::Render];
        }
        self.status_message = Some(format!("Creating chat \"{caption}\"..."));
        vec![AppAction::CreateChat { caption: caption.to_string() }, AppAction::Render]
    }

    /// Join an existing chat by identifier.
    pub fn join_chat(&mut self, chat_id: &str) -> Vec<AppAction> {
        self.status_message = Some(format!("Joining chat {chat_id}..."));
        vec![AppAction::JoinChat { chat_id: chat_id.to_string() }, AppAction::Render]
    }

    /// Send a message in the selected chat.
    pub fn send_message(&mut self, text: &str) -> Vec<AppAction> {
        if self.selected.is_none() {
            self.status_message = Some("Select a chat to start messaging".to_string());
            return vec![AppAction::Render];
        }
        vec![AppAction::SendMessage { text: text.to_string() }, AppAction::Render]
    }

    /// Deselect the current chat, tearing the session down deliberately.
    pub fn deselect_chat(&mut self) -> Vec<AppAction> {
        if self.selected.take().is_none() {
            return vec![];
        }
        vec![AppAction::CloseSession, AppAction::Render]
    }

    /// Leave the currently selected chat.
    pub fn leave_selected_chat(&mut self) -> Vec<AppAction> {
        match self.selected.clone() {
            Some(chat_id) => vec![AppAction::LeaveChat { chat_id }, AppAction::Render],
            None => {
                self.status_message = Some("No chat selected".to_string());
                vec![AppAction::Render]
            },
        }
    }

    /// Log out: drop the session, clear the credential, return to login.
    pub fn logout(&mut self) -> Vec<AppAction> {
        self.screen = Screen::Login;
        self.register_mode = false;
        self.chats.clear();
        self.selected = None;
        self.username = None;
        self.status_message = None;
        vec![AppAction::CloseSession, AppAction::Logout, AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Screen currently shown.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Whether the login form is in registration mode.
    pub fn register_mode(&self) -> bool {
        self.register_mode
    }

    /// Whether an auth request is in flight.
    pub fn auth_busy(&self) -> bool {
        self.auth_busy
    }

    /// Chats the user participates in, in load order.
    pub fn chats(&self) -> &[ChatRecord] {
        &self.chats
    }

    /// Identifier of the selected chat.
    pub fn selected_chat(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Record of the selected chat. `None` if nothing is selected.
    pub fn selected_chat_record(&self) -> Option<&ChatRecord> {
        self.selected.as_deref().and_then(|id| self.chats.iter().find(|c| c.chat_id == id))
    }

    /// Authenticated username.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Transient status message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }
}
