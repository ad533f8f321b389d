//! Sign-in modal
//!
//! Provider selector and the email and name fields, centered on screen.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{FormField, SignInForm};

const MODAL_WIDTH: u16 = 64;
const MODAL_HEIGHT: u16 = 8;
const LABEL_WIDTH: u16 = 12; // "> Provider: "
const TITLE: &str = " Sign in to FriendlyChat ";
const HINTS: &str = "Tab provider  Up/Down field  Enter sign in  Esc cancel";

/// Render the sign-in modal.
pub fn render(frame: &mut Frame, form: &SignInForm, area: Rect) {
    let modal = centered(area, MODAL_WIDTH, MODAL_HEIGHT);

    let mut providers = vec![label("Provider:", false)];
    for &provider in form.providers() {
        let style = if provider == form.provider() {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        providers.push(Span::styled(format!(" {provider} "), style));
        providers.push(Span::raw(" "));
    }

    let email_focused = form.focus() == FormField::Email;
    let lines = vec![
        Line::from(providers),
        Line::from(vec![label("Email:", email_focused), Span::raw(form.email().to_string())]),
        Line::from(vec![
            label("Name:", !email_focused),
            Span::raw(form.display_name().to_string()),
        ]),
        Line::default(),
        Line::from(Span::styled(
            form.error().unwrap_or_default().to_string(),
            Style::default().fg(Color::Red),
        )),
        Line::from(Span::styled(HINTS, Style::default().fg(Color::DarkGray))),
    ];

    let block = Block::default().borders(Borders::ALL).title(TITLE);
    frame.render_widget(Clear, modal);
    frame.render_widget(Paragraph::new(lines).block(block), modal);

    let (row, text) = if email_focused { (2, form.email()) } else { (3, form.display_name()) };
    let text_width = text.chars().count() as u16;
    let cursor_x = modal.x.saturating_add(1 + LABEL_WIDTH).saturating_add(text_width);
    let max_x = modal.x.saturating_add(modal.width).saturating_sub(2);
    frame.set_cursor_position((cursor_x.min(max_x), modal.y.saturating_add(row)));
}

fn label(text: &str, focused: bool) -> Span<'static> {
    let marker = if focused { ">" } else { " " };
    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Span::styled(format!("{marker} {text:<10}"), style)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use friendlychat_app::IdentityProvider;

    use super::*;
    use crate::{
        FormKey,
        ui::testing::{contains, draw},
    };

    #[test]
    fn shows_fields_and_selected_provider() {
        let mut form = SignInForm::new(&[IdentityProvider::Email, IdentityProvider::Google]);
        for c in "bob@example.com".chars() {
            form.handle(FormKey::Char(c));
        }

        let rows = draw(80, 12, |frame, area| render(frame, &form, area));

        assert!(contains(&rows, "Sign in to FriendlyChat"));
        assert!(contains(&rows, " email   google "));
        assert!(contains(&rows, "> Email:    bob@example.com"));
        assert!(contains(&rows, "  Name:"));
    }

    #[test]
    fn shows_validation_error() {
        let mut form = SignInForm::new(&[IdentityProvider::Email]);
        form.handle(FormKey::Enter);

        let rows = draw(80, 12, |frame, area| render(frame, &form, area));

        assert!(contains(&rows, "Email is required"));
    }

    #[test]
    fn reopened_form_shows_backend_rejection() {
        let providers = [IdentityProvider::Email];
        let mut form = SignInForm::new(&providers);
        for c in "eve@".chars() {
            form.handle(FormKey::Char(c));
        }
        let form = SignInForm::reopen(
            Some(form),
            &providers,
            Some("invalid credential: malformed email address"),
        );

        let rows = draw(80, 12, |frame, area| render(frame, &form, area));

        assert!(contains(&rows, "invalid credential: malformed email address"));
        assert!(contains(&rows, "> Email:    eve@"));
    }

    #[test]
    fn modal_fits_small_terminal() {
        let form = SignInForm::new(&[IdentityProvider::Email]);
        let rows = draw(20, 4, |frame, area| render(frame, &form, area));
        assert_eq!(rows.len(), 4);
    }
}
