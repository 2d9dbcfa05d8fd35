//! Async runtime
//!
//! Event loop that drives terminal I/O and coordinates between the App state
//! machine, the session bridge, the REST client, and the WebSocket
//! transport. Uses tokio::select! to handle terminal events, transport
//! events, and API completions concurrently.
//!
//! The runtime owns the single live socket handle. Session actions carry the
//! generation of the connection they target, so executing them is a plain
//! comparison — no handler detachment, no races with in-flight events.

use std::io::{self, stdout};

use chatwire_api::{ApiClient, ApiError, JoinOutcome};
use chatwire_app::{App, AppAction, AppEvent, Bridge};
use chatwire_client::{
    SessionAction, SessionEvent, SharedCredentials,
    transport::{self, ConnectedSocket},
};
use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{
    input::{InputState, KeyInput},
    ui,
};

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Async runtime for the TUI.
///
/// Manages terminal setup/teardown, the main event loop, and the execution
/// of actions produced by the App and session state machines.
pub struct Runtime {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    bridge: Bridge<SharedCredentials>,
    api: ApiClient,
    input: InputState,
    /// The single live socket handle. Replaced on connect, dropped on
    /// disconnect; stale handles are never kept around.
    connection: Option<ConnectedSocket>,
    /// Session events from the transport, retry timers, and config
    /// resolution.
    session_tx: mpsc::Sender<SessionEvent>,
    session_rx: mpsc::Receiver<SessionEvent>,
    /// App events completing spawned API calls.
    events_tx: mpsc::Sender<AppEvent>,
    events_rx: mpsc::Receiver<AppEvent>,
}

impl Runtime {
    /// Create a new runtime against the API at `api_base`.
    pub fn new(api_base: String) -> Result<Self, RuntimeError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        let credentials = SharedCredentials::new();
        let api = ApiClient::new(api_base, credentials.clone());
        let bridge = Bridge::new(credentials);

        let (session_tx, session_rx) = mpsc::channel(64);
        let (events_tx, events_rx) = mpsc::channel(16);

        Ok(Self {
            terminal,
            app: App::new(),
            bridge,
            api,
            input: InputState::new(),
            connection: None,
            session_tx,
            session_rx,
            events_tx,
            events_rx,
        })
    }

    /// Run the main event loop.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        self.render()?;
        self.resolve_config();

        let mut event_stream = EventStream::new();
        let mut tick_interval = tokio::time::interval(std::time::Duration::from_millis(250));

        loop {
            let should_quit = tokio::select! {
                // Terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_terminal_event(event).await?,
                        Some(Err(e)) => return Err(RuntimeError::Io(e)),
                        None => true,
                    }
                }

                // Transport lifecycle, retry timers, config resolution
                Some(event) = self.session_rx.recv() => {
                    self.bridge.transport_event(event);
                    self.execute_session_actions().await;
                    self.render()?;
                    false
                }

                // Completions of spawned API calls
                Some(event) = self.events_rx.recv() => {
                    if matches!(event, AppEvent::LoggedIn { .. }) {
                        self.input.clear_login();
                    }
                    let actions = self.app.handle(event);
                    self.process_actions(actions).await?
                }

                // Periodic tick
                _ = tick_interval.tick() => {
                    let actions = self.app.handle(AppEvent::Tick);
                    self.process_actions(actions).await?
                }
            };

            if should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle a terminal event and return whether to quit.
    async fn handle_terminal_event(&mut self, event: Event) -> Result<bool, RuntimeError> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let Some(key) = map_key(key) else {
                    return Ok(false);
                };
                let actions = self.input.handle_key(key, &mut self.app);
                self.process_actions(actions).await
            },
            Event::Resize(cols, rows) => {
                let actions = self.app.handle(AppEvent::Resize(cols, rows));
                self.process_actions(actions).await
            },
            _ => Ok(false),
        }
    }

    /// Execute actions returned by the App. Returns true if should quit.
    async fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, RuntimeError> {
        for action in actions {
            match action {
                AppAction::Render => self.render()?,
                AppAction::Quit => return Ok(true),

                AppAction::Login { username, password } => self.spawn_login(username, password),
                AppAction::Register { username, password } => {
                    self.spawn_register(username, password);
                },
                AppAction::LoadChats => self.spawn_load_chats(),
                AppAction::CreateChat { caption } => self.spawn_create_chat(caption),
                AppAction::JoinChat { chat_id } => self.spawn_join_chat(chat_id),
                AppAction::LeaveChat { chat_id } => self.spawn_leave_chat(chat_id),

                // Session operations go through the bridge
                AppAction::OpenSession { chat_id } => {
                    self.bridge.select_conversation(chat_id);
                    self.execute_session_actions().await;
                },
                AppAction::CloseSession => {
                    self.bridge.clear_conversation();
                    self.execute_session_actions().await;
                },
                AppAction::SendMessage { text } => {
                    self.bridge.submit_input(text);
                    self.execute_session_actions().await;
                },

                AppAction::Logout => self.api.logout(),
            }
        }
        Ok(false)
    }

    /// Drain and execute session actions until none remain.
    ///
    /// A failed send feeds back into the session and may append transcript
    /// entries, hence the loop.
    async fn execute_session_actions(&mut self) {
        loop {
            let actions = self.bridge.take_outgoing();
            if actions.is_empty() {
                return;
            }

            for action in actions {
                match action {
                    SessionAction::Connect { url, generation } => {
                        // Exactly one live connection: replacing the handle
                        // drops (and thereby closes) any previous socket.
                        self.connection =
                            Some(transport::connect(url, generation, self.session_tx.clone()));
                    },
                    SessionAction::Disconnect { generation } => {
                        if let Some(conn) =
                            self.connection.take_if(|c| c.generation() == generation)
                        {
                            conn.stop();
                        }
                    },
                    SessionAction::SendText { text, generation } => {
                        let live = match &self.connection {
                            Some(conn) if conn.generation() == generation => {
                                conn.send(text).await.is_ok()
                            },
                            _ => false,
                        };
                        if !live {
                            self.bridge.transport_event(SessionEvent::SendFailed { generation });
                        }
                    },
                    SessionAction::ScheduleRetry { generation, delay } => {
                        let session_tx = self.session_tx.clone();
                        tokio::spawn(async move {
                            tokio::time::sleep(delay).await;
                            let _ = session_tx
                                .send(SessionEvent::RetryElapsed { generation })
                                .await;
                        });
                    },
                }
            }
        }
    }

    /// Fetch the socket endpoint base from the config endpoint.
    ///
    /// The session defers opening until this resolves.
    fn resolve_config(&self) {
        let api = self.api.clone();
        let session_tx = self.session_tx.clone();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            match api.config().await {
                Ok(config) => {
                    tracing::info!(host = %config.websocket_host, "resolved socket endpoint");
                    let _ = session_tx
                        .send(SessionEvent::EndpointResolved { base: config.websocket_host })
                        .await;
                },
                Err(e) => {
                    tracing::error!(error = %e, "failed to load server config");
                    let _ = events_tx
                        .send(AppEvent::Error { message: format!("failed to load config: {e}") })
                        .await;
                },
            }
        });
    }

    fn spawn_login(&self, username: String, password: String) {
        let api = self.api.clone();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match api.login(&username, &password).await {
                Ok(()) => AppEvent::LoggedIn { username },
                Err(e @ ApiError::InvalidCredentials) => {
                    AppEvent::AuthFailed { message: e.to_string() }
                },
                Err(e) => {
                    tracing::error!(error = %e, "login failed");
                    AppEvent::AuthFailed {
                        message: "An error occurred. Please try again later.".to_string(),
                    }
                },
            };
            let _ = events_tx.send(event).await;
        });
    }

    fn spawn_register(&self, username: String, password: String) {
        let api = self.api.clone();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match api.register(&username, &password).await {
                Ok(()) => AppEvent::RegistrationCompleted,
                Err(e) => {
                    tracing::error!(error = %e, "registration failed");
                    AppEvent::AuthFailed {
                        message: "Registration failed. Please try again.".to_string(),
                    }
                },
            };
            let _ = events_tx.send(event).await;
        });
    }

    fn spawn_load_chats(&self) {
        let api = self.api.clone();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match api.chats().await {
                Ok(chats) => AppEvent::ChatsLoaded { chats },
                Err(e) => AppEvent::Error { message: format!("failed to load chats: {e}") },
            };
            let _ = events_tx.send(event).await;
        });
    }

    fn spawn_create_chat(&self, caption: String) {
        let api = self.api.clone();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match api.create_chat(&caption).await {
                Ok(chat) => AppEvent::ChatCreated { chat },
                Err(e) => AppEvent::Error { message: format!("failed to create chat: {e}") },
            };
            let _ = events_tx.send(event).await;
        });
    }

    fn spawn_join_chat(&self, chat_id: String) {
        let api = self.api.clone();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match api.join_chat(&chat_id).await {
                Ok(outcome) => {
                    if matches!(outcome, JoinOutcome::AlreadyParticipant(_)) {
                        tracing::debug!(chat_id, "already joined");
                    }
                    AppEvent::ChatJoined { chat: outcome.into_record() }
                },
                Err(e) => AppEvent::Error { message: format!("failed to join chat: {e}") },
            };
            let _ = events_tx.send(event).await;
        });
    }

    fn spawn_leave_chat(&self, chat_id: String) {
        let api = self.api.clone();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match api.leave_chat(&chat_id).await {
                Ok(()) => AppEvent::ChatLeft { chat_id },
                Err(e) => AppEvent::Error { message: format!("failed to leave chat: {e}") },
            };
            let _ = events_tx.send(event).await;
        });
    }

    /// Render the UI.
    fn render(&mut self) -> Result<(), RuntimeError> {
        let Self { terminal, app, bridge, input, .. } = self;
        terminal.draw(|frame| {
            ui::render(frame, app, bridge.session(), input);
        })?;
        Ok(())
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Map a crossterm key event to a [`KeyInput`].
fn map_key(key: KeyEvent) -> Option<KeyInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && let KeyCode::Char(c) = key.code
    {
        return Some(KeyInput::Ctrl(c));
    }

    match key.code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Tab => Some(KeyInput::Tab),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::Home => Some(KeyInput::Home),
        KeyCode::End => Some(KeyInput::End),
        _ => None,
    }
}
