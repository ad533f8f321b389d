//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into a frame.

mod composer;
mod messages;
mod sign_in;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{App, SignInForm};

/// Render the chat screen.
pub fn render(frame: &mut Frame, app: &App) {
    const MESSAGES_MIN_HEIGHT: u16 = 3;
    const COMPOSER_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MESSAGES_MIN_HEIGHT),
            Constraint::Length(COMPOSER_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [messages_area, composer_area, status_area] = chunks.as_ref() else {
        return;
    };

    messages::render(frame, app, *messages_area);
    composer::render(frame, app.composer(), app.can_send(), *composer_area);
    status::render(frame, app, *status_area);
}

/// Render the sign-in modal centered on an otherwise empty frame.
pub fn render_sign_in(frame: &mut Frame, form: &SignInForm) {
    let area = frame.area();
    sign_in::render(frame, form, area);
}
