//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard, focus and paste events and ratatui for rendering. The sign-in
//! flow runs as a modal loop on the same event stream.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{
        DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange, Event,
        EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use friendlychat_app::{IdentityProvider, MenuItem, SignInOutcome};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::{App, AppEvent, Driver, FormKey, FormStatus, KeyInput, SignInForm, ui};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The terminal event stream ended.
    #[error("terminal input closed")]
    InputClosed,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the terminal for its whole lifetime: raw mode, the alternate screen,
/// focus reporting and bracketed paste are switched on in [`Self::new`] and
/// restored on [`Driver::stop`] or drop.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    /// Form of the last submitted attempt, reopened if it gets rejected.
    last_form: Option<SignInForm>,
    restored: bool,
}

impl TerminalDriver {
    /// Take over the terminal.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout()
            .execute(EnterAlternateScreen)?
            .execute(EnableFocusChange)?
            .execute(EnableBracketedPaste)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, last_form: None, restored: false })
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        stdout()
            .execute(DisableBracketedPaste)?
            .execute(DisableFocusChange)?
            .execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        let timeout = tokio::time::Duration::from_millis(100);

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => Ok(translate_event(event)),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    None => Err(TerminalError::InputClosed),
                }
            }

            // Tick timeout
            () = tokio::time::sleep(timeout) => Ok(Some(AppEvent::Tick)),
        }
    }

    async fn sign_in(
        &mut self,
        providers: &[IdentityProvider],
        rejection: Option<&str>,
    ) -> Result<SignInOutcome, Self::Error> {
        let mut form = SignInForm::reopen(self.last_form.take(), providers, rejection);

        loop {
            self.terminal.draw(|frame| ui::render_sign_in(frame, &form))?;

            let Some(event) = self.event_stream.next().await else {
                return Err(TerminalError::InputClosed);
            };
            let Event::Key(key) = event? else {
                continue;
            };
            let Some(form_key) = translate_form_key(key) else {
                continue;
            };

            match form.handle(form_key) {
                FormStatus::Editing => {},
                FormStatus::Submitted(credential) => {
                    self.last_form = Some(form);
                    return Ok(SignInOutcome::SignedIn(credential));
                },
                FormStatus::Canceled => return Ok(SignInOutcome::Canceled),
            }
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    fn stop(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        if let Err(e) = self.restore() {
            tracing::warn!("failed to restore terminal: {e}");
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Convert a crossterm event into an application event.
///
/// Control chords map to the screen's menu and buttons. Focus changes stand
/// in for the screen becoming hidden or visible.
pub fn translate_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => translate_key(key),
        Event::Paste(text) => Some(AppEvent::Paste(text)),
        Event::Resize(cols, rows) => Some(AppEvent::Resize(cols, rows)),
        Event::FocusLost => Some(AppEvent::Paused),
        Event::FocusGained => Some(AppEvent::Resumed),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<AppEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(AppEvent::Key(KeyInput::Esc)),
            KeyCode::Char('o') => Some(AppEvent::MenuSelected(MenuItem::SignOut)),
            KeyCode::Char('p') => Some(AppEvent::PhotoPickerPressed),
            _ => None,
        };
    }

    let input = match key.code {
        KeyCode::Char(c) => KeyInput::Char(c),
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Backspace => KeyInput::Backspace,
        KeyCode::Delete => KeyInput::Delete,
        KeyCode::Esc => KeyInput::Esc,
        KeyCode::Left => KeyInput::Left,
        KeyCode::Right => KeyInput::Right,
        KeyCode::Home => KeyInput::Home,
        KeyCode::End => KeyInput::End,
        _ => return None,
    };
    Some(AppEvent::Key(input))
}

/// Convert a key press into a sign-in form key.
pub fn translate_form_key(key: KeyEvent) -> Option<FormKey> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(FormKey::Esc);
    }

    match key.code {
        KeyCode::Char(c) => Some(FormKey::Char(c)),
        KeyCode::Backspace => Some(FormKey::Backspace),
        KeyCode::Tab | KeyCode::BackTab => Some(FormKey::Tab),
        KeyCode::Up => Some(FormKey::Up),
        KeyCode::Down => Some(FormKey::Down),
        KeyCode::Enter => Some(FormKey::Enter),
        KeyCode::Esc => Some(FormKey::Esc),
        _ => None,
    }
}
