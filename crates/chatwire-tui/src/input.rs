//! Input state and key handling for the TUI.
//!
//! Owns all text input state: the login form fields and the chat input
//! buffer with its cursor. Command parsing happens here on Enter; everything
//! else is translated into App API calls whose actions the runtime executes.

use chatwire_app::{App, AppAction, Screen};

use crate::commands::{self, Command};

/// Key input events from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Character input.
    Char(char),
    /// Character with the Control modifier held.
    Ctrl(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// Focused field of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    /// Username field.
    Username,
    /// Password field.
    Password,
}

/// Input state for the TUI.
///
/// The chat buffer and the login form are independent; which one a key
/// lands in follows the App's current screen.
#[derive(Debug)]
pub struct InputState {
    /// Chat input buffer.
    buffer: String,
    /// Cursor position within the chat buffer.
    cursor: usize,
    /// Login form: username field.
    username: String,
    /// Login form: password field.
    password: String,
    /// Login form: focused field.
    focus: LoginField,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            username: String::new(),
            password: String::new(),
            focus: LoginField::Username,
        }
    }
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the chat input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current cursor position in the chat input buffer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Login form username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Login form password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Focused login form field.
    pub fn focus(&self) -> LoginField {
        self.focus
    }

    /// Wipe the login form (called after a successful login).
    pub fn clear_login(&mut self) {
        self.username.clear();
        self.password.clear();
        self.focus = LoginField::Username;
    }

    /// Handle a key input event.
    pub fn handle_key(&mut self, key: KeyInput, app: &mut App) -> Vec<AppAction> {
        match app.screen() {
            Screen::Login => self.handle_login_key(key, app),
            Screen::Chats => self.handle_chat_key(key, app),
        }
    }

    fn handle_login_key(&mut self, key: KeyInput, app: &mut App) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => {
                match self.focus {
                    LoginField::Username => self.username.push(c),
                    LoginField::Password => self.password.push(c),
                }
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                match self.focus {
                    LoginField::Username => {
                        self.username.pop();
                    },
                    LoginField::Password => {
                        self.password.pop();
                    },
                }
                vec![AppAction::Render]
            },
            KeyInput::Tab => {
                self.focus = match self.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
                vec![AppAction::Render]
            },
            KeyInput::Enter => {
                let (username, password) = (self.username.clone(), self.password.clone());
                app.submit_auth(&username, &password)
            },
            KeyInput::Ctrl('r') => app.toggle_register_mode(),
            KeyInput::Ctrl('c') | KeyInput::Esc => app.quit(),
            KeyInput::Ctrl(_)
            | KeyInput::Delete
            | KeyInput::Left
            | KeyInput::Right
            | KeyInput::Home
            | KeyInput::End => vec![],
        }
    }

    fn handle_chat_key(&mut self, key: KeyInput, app: &mut App) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => {
                self.buffer.insert(self.cursor, c);
                self.cursor = self.cursor.saturating_add(c.len_utf8());
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    let previous = floor_char_boundary(&self.buffer, self.cursor - 1);
                    self.buffer.remove(previous);
                    self.cursor = previous;
                }
                vec![AppAction::Render]
            },
            KeyInput::Delete => {
                if self.cursor < self.buffer.len() {
                    self.buffer.remove(self.cursor);
                }
                vec![AppAction::Render]
            },
            KeyInput::Left => {
                if self.cursor > 0 {
                    self.cursor = floor_char_boundary(&self.buffer, self.cursor - 1);
                }
                vec![AppAction::Render]
            },
            KeyInput::Right => {
                if self.cursor < self.buffer.len() {
                    self.cursor = ceil_char_boundary(&self.buffer, self.cursor + 1);
                }
                vec![AppAction::Render]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![AppAction::Render]
            },
            KeyInput::End => {
                self.cursor = self.buffer.len();
                vec![AppAction::Render]
            },
            KeyInput::Enter => self.handle_enter(app),
            KeyInput::Tab => Self::handle_tab(app),
            KeyInput::Esc => {
                if app.selected_chat().is_some() {
                    app.deselect_chat()
                } else {
                    app.quit()
                }
            },
            KeyInput::Ctrl('c') => app.quit(),
            KeyInput::Ctrl(_) => vec![],
        }
    }

    /// Handle Enter: parse the line and call the matching App API.
    fn handle_enter(&mut self, app: &mut App) -> Vec<AppAction> {
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;

        if text.is_empty() {
            return vec![];
        }

        match commands::parse(&text) {
            Command::Message { content } => app.send_message(&content),
            Command::Create { caption } => app.create_chat(&caption),
            Command::Join { chat_id } => app.join_chat(&chat_id),
            Command::Leave => app.leave_selected_chat(),
            Command::Share => {
                match app.selected_chat_record() {
                    Some(record) => {
                        let chat_id = record.chat_id.clone();
                        app.set_status(format!("Share this chat id: {chat_id}"));
                    },
                    None => app.set_status("No chat selected"),
                }
                vec![AppAction::Render]
            },
            Command::Logout => app.logout(),
            Command::Quit => app.quit(),
            Command::Unknown { input } => {
                app.set_status(format!("Unknown command: /{input}"));
                vec![AppAction::Render]
            },
            Command::InvalidArgs { command, error } => {
                app.set_status(format!("/{command}: {error}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Handle Tab: cycle through the chat list, wrapping around.
    fn handle_tab(app: &mut App) -> Vec<AppAction> {
        let ids: Vec<String> = app.chats().iter().map(|c| c.chat_id.clone()).collect();
        if ids.is_empty() {
            return vec![];
        }

        let next = match app.selected_chat().and_then(|id| ids.iter().position(|c| c == id)) {
            Some(index) => (index + 1) % ids.len(),
            None => 0,
        };
        app.select_chat(&ids[next])
    }
}

/// Largest char boundary not greater than `index`.
fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Smallest char boundary not smaller than `index`.
fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
