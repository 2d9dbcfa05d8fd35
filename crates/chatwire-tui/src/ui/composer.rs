//! Message input line.
//!
//! Displays the chat input buffer with cursor, dimmed while the connection
//! is not open.

use chatwire_client::{Session, SharedCredentials};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::input::InputState;

const PROMPT_WIDTH: u16 = 3; // "> "
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the input line.
pub fn render(
    frame: &mut Frame,
    session: &Session<SharedCredentials>,
    input: &InputState,
    area: Rect,
) {
    let style = if session.is_connected() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text = if input.buffer().is_empty() && !session.is_connected() {
        "> Type a message".to_string()
    } else {
        format!("> {}", input.buffer())
    };

    let block = Block::default().borders(Borders::ALL);
    let paragraph = Paragraph::new(text).style(style).block(block);

    frame.render_widget(paragraph, area);

    let cursor_chars = input.buffer()[..input.cursor()].chars().count() as u16;
    let available_width = area.width.saturating_sub(PROMPT_WIDTH + RIGHT_PADDING);
    let cursor_offset = cursor_chars.min(available_width);

    let cursor_x = area.x.saturating_add(PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);

    frame.set_cursor_position((cursor_x.min(max_x), cursor_y));
}
