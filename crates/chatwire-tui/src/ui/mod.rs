//! UI rendering
//!
//! Rendering functions that convert App and session state into terminal
//! output using ratatui widgets. All functions are pure (no I/O), taking
//! state and returning widget trees.

mod avatar;
mod chats;
mod composer;
mod login;
mod status;
mod transcript;

use chatwire_app::{App, Screen};
use chatwire_client::{Session, SharedCredentials};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::input::InputState;

/// Render the entire UI.
pub fn render(
    frame: &mut Frame,
    app: &App,
    session: &Session<SharedCredentials>,
    input: &InputState,
) {
    match app.screen() {
        Screen::Login => login::render(frame, app, input),
        Screen::Chats => render_chats_screen(frame, app, session, input),
    }
}

/// Render the chats screen (sidebar + transcript + input + status).
fn render_chats_screen(
    frame: &mut Frame,
    app: &App,
    session: &Session<SharedCredentials>,
    input: &InputState,
) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, app, session, *main_area);
    composer::render(frame, session, input, *input_area);
    status::render(frame, app, session, *status_area);
}

/// Render the main area (chat list sidebar + transcript).
fn render_main_area(
    frame: &mut Frame,
    app: &App,
    session: &Session<SharedCredentials>,
    area: Rect,
) {
    const SIDEBAR_WIDTH: u16 = 26;
    const TRANSCRIPT_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(TRANSCRIPT_MIN_WIDTH)])
        .split(area);

    let [chats_area, transcript_area] = chunks.as_ref() else {
        return;
    };

    chats::render(frame, app, *chats_area);
    transcript::render(frame, app, session, *transcript_area);
}
