//! Message list
//!
//! Displays the feed rows, newest at the bottom.

use friendlychat_app::{App, RowBody};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;
const TITLE: &str = " FriendlyChat ";

/// Render the message list.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(TITLE);

    let items: Vec<ListItem> = if app.messages().is_empty() {
        let hint = if app.session().is_signed_in() {
            "No messages yet. Say hello!"
        } else {
            "Sign in to see messages"
        };
        vec![ListItem::new(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))))]
    } else {
        app.messages()
            .rows()
            .map(|row| {
                let body = match row.body {
                    RowBody::Text(text) => Span::raw(text.to_string()),
                    RowBody::Photo(url) => {
                        Span::styled(format!("[image] {url}"), Style::default().fg(Color::Cyan))
                    },
                };

                ListItem::new(Line::from(vec![
                    Span::styled(
                        row.author.to_string(),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    body,
                ]))
            })
            .collect()
    };

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
