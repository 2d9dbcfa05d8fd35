//! Status bar
//!
//! Displays connection status, the logged-in identity, and the transient
//! status message.

use chatwire_app::App;
use chatwire_client::{ConnectionState, Session, SharedCredentials};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const DEFAULT_HINT: &str = "Tab: switch chat · /create /join /leave /share /logout /quit";

/// Render the status bar.
pub fn render(
    frame: &mut Frame,
    app: &App,
    session: &Session<SharedCredentials>,
    area: Rect,
) {
    let connection_status = match session.connection_state() {
        ConnectionState::Idle => Span::styled("Idle", Style::default().fg(Color::Gray)),
        ConnectionState::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        ConnectionState::Open => Span::styled(
            "Connected",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        ConnectionState::RetryScheduled => {
            Span::styled("Reconnecting...", Style::default().fg(Color::Yellow))
        },
    };

    let identity = app.username().map_or_else(String::new, |name| format!(" | {name}"));
    let message = app.status_message().unwrap_or(DEFAULT_HINT);

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection_status,
        Span::styled(identity, Style::default().fg(Color::Gray)),
        Span::styled(format!(" | {message}"), Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
