//! Composer
//!
//! Displays the input buffer with cursor, the length counter and whether
//! Enter will send.

use friendlychat_app::Composer;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const PROMPT: &str = "> ";
const PROMPT_WIDTH: u16 = 3; // "> " plus left border
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the composer box.
pub fn render(frame: &mut Frame, composer: &Composer, can_send: bool, area: Rect) {
    let counter = format!(" {}/{} ", composer.len(), composer.limit());
    let send_color = if can_send { Color::Green } else { Color::DarkGray };
    let send_hint = Line::from(Span::styled(" Enter to send ", Style::default().fg(send_color)));
    let block =
        Block::default().borders(Borders::ALL).title(counter).title(send_hint.right_aligned());

    // Scroll horizontally so the cursor stays inside the box.
    let available_width = area.width.saturating_sub(PROMPT_WIDTH + RIGHT_PADDING) as usize;
    let scroll = composer.cursor().saturating_sub(available_width);
    let visible: String = composer.text().chars().skip(scroll).collect();

    let paragraph = Paragraph::new(format!("{PROMPT}{visible}"))
        .style(Style::default().fg(Color::White))
        .block(block);
    frame.render_widget(paragraph, area);

    let cursor_offset = (composer.cursor() - scroll) as u16;
    let cursor_x = area.x.saturating_add(PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);

    frame.set_cursor_position((cursor_x.min(max_x), cursor_y));
}
