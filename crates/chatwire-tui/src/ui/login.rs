//! Login / registration form.

use chatwire_app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::input::{InputState, LoginField};

const FORM_WIDTH: u16 = 46;
const FORM_HEIGHT: u16 = 11;

/// Render the centered login form.
pub fn render(frame: &mut Frame, app: &App, input: &InputState) {
    let area = centered_rect(FORM_WIDTH, FORM_HEIGHT, frame.area());

    let title = if app.register_mode() { " Register " } else { " Login " };
    let block = Block::default().borders(Borders::ALL).title(title);

    let focused = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let unfocused = Style::default().fg(Color::DarkGray);
    let (username_style, password_style) = match input.focus() {
        LoginField::Username => (focused, unfocused),
        LoginField::Password => (unfocused, focused),
    };

    let masked = "•".repeat(input.password().chars().count());

    let mut lines = vec![
        Line::default(),
        Line::from(vec![
            Span::styled("  Username: ", username_style),
            Span::raw(input.username().to_string()),
        ]),
        Line::from(vec![Span::styled("  Password: ", password_style), Span::raw(masked)]),
        Line::default(),
    ];

    match app.status_message() {
        Some(message) => lines.push(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::default()),
    }

    lines.push(Line::default());
    let toggle_hint = if app.register_mode() {
        "  Ctrl+R: back to login · Esc: quit"
    } else {
        "  Ctrl+R: register · Esc: quit"
    };
    for hint in ["  Enter: submit · Tab: switch field", toggle_hint] {
        lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Center a `width` x `height` box in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);

    let middle = vertical.get(1).copied().unwrap_or(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width.min(area.width)),
            Constraint::Fill(1),
        ])
        .split(middle);

    horizontal.get(1).copied().unwrap_or(middle)
}
