//! Status bar
//!
//! Displays the session, the row count and the latest notice.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

const KEY_HINTS: &str = " | ^O sign out  ^P photo  Esc quit";

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let session = if app.session().is_signed_in() {
        Span::styled(
            format!("Signed in as {}", app.session().author()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("Signed out", Style::default().fg(Color::Red))
    };

    let mut info = format!(" | Messages: {}", app.messages().len());
    if let Some(notice) = app.status_message() {
        info.push_str(" | ");
        info.push_str(notice);
    }

    let status_line = Line::from(vec![
        Span::raw(" "),
        session,
        Span::styled(info, Style::default().fg(Color::White)),
        Span::styled(KEY_HINTS, Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
