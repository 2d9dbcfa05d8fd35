//! Chat list sidebar.
//!
//! Displays the chats the user participates in, each with its colored
//! avatar badge, highlighting the selected one.

use chatwire_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::ui::avatar;

const SELECTED_PREFIX: &str = "> ";
const UNSELECTED_PREFIX: &str = "  ";

/// Render the chat list sidebar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = if app.chats().is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No chats yet: /create or /join",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        app.chats()
            .iter()
            .map(|chat| {
                let selected = app.selected_chat() == Some(chat.chat_id.as_str());

                let badge = format!(" {:<2} ", avatar::initials(&chat.caption));
                let badge_style =
                    Style::default().bg(avatar::color(&chat.caption)).fg(Color::Black);

                let caption_style = if selected {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                ListItem::new(Line::from(vec![
                    Span::raw(if selected { SELECTED_PREFIX } else { UNSELECTED_PREFIX }),
                    Span::styled(badge, badge_style),
                    Span::raw(" "),
                    Span::styled(chat.caption.clone(), caption_style),
                ]))
            })
            .collect()
    };

    let block = Block::default().borders(Borders::ALL).title(" Chats ");
    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
