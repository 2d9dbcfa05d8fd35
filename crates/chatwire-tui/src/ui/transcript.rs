//! Transcript area.
//!
//! Displays the session's transcript for the selected chat: messages with
//! sender and send time, the current system status line, and error entries.

use chatwire_app::App;
use chatwire_client::{EntryKind, LogEntry, Session, SharedCredentials};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;

/// Render the transcript area.
pub fn render(
    frame: &mut Frame,
    app: &App,
    session: &Session<SharedCredentials>,
    area: Rect,
) {
    let title = app
        .selected_chat_record()
        .map_or_else(|| " No Chat ".to_string(), |chat| format!(" {} ", chat.caption));

    let block = Block::default().borders(Borders::ALL).title(title);

    let items: Vec<ListItem> = if app.selected_chat().is_none() {
        vec![ListItem::new(Line::from(Span::styled(
            "Please select a chat to start messaging.",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        session.log().iter().map(entry_item).collect()
    };

    // Keep the latest entries visible.
    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}

/// Render one transcript entry.
fn entry_item(entry: &LogEntry) -> ListItem<'static> {
    match &entry.kind {
        EntryKind::Message { username, own } => {
            let name = username.as_deref().unwrap_or("?");
            let name_style = if *own {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            };

            let mut spans = vec![
                Span::styled(format!("<{name}>"), name_style),
                Span::raw(" "),
                Span::raw(entry.content.clone()),
            ];
            if let Some(time) = local_time(entry.timestamp.as_deref()) {
                spans.push(Span::styled(format!("  {time}"), Style::default().fg(Color::DarkGray)));
            }
            ListItem::new(Line::from(spans))
        },
        EntryKind::System => ListItem::new(Line::from(Span::styled(
            format!("· {} ·", entry.content),
            Style::default().fg(Color::DarkGray),
        ))),
        EntryKind::Error => ListItem::new(Line::from(Span::styled(
            format!("! {}", entry.content),
            Style::default().fg(Color::Red),
        ))),
    }
}

/// Local wall-clock rendering of an RFC 3339 timestamp.
///
/// Malformed or missing timestamps render nothing rather than failing the
/// entry.
fn local_time(timestamp: Option<&str>) -> Option<String> {
    let parsed = chrono::DateTime::parse_from_rfc3339(timestamp?).ok()?;
    Some(parsed.with_timezone(&chrono::Local).format("%H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_time_renders_hours_and_minutes() {
        let time = local_time(Some("2025-03-01T12:34:56Z"));
        assert_eq!(time.map(|t| t.len()), Some(5));
    }

    #[test]
    fn malformed_timestamps_render_nothing() {
        assert_eq!(local_time(Some("not a timestamp")), None);
        assert_eq!(local_time(None), None);
    }
}
