//! Sign-in form state.
//!
//! The modal shown while the runtime waits for a sign-in outcome. Holds the
//! provider selection and the two text fields. Key handling is pure so the
//! form can be exercised without a terminal.

use friendlychat_app::{Credential, IdentityProvider};

/// Keys understood by the sign-in form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    /// Character input into the focused field.
    Char(char),
    /// Delete the last character of the focused field.
    Backspace,
    /// Cycle to the next provider.
    Tab,
    /// Focus the previous field.
    Up,
    /// Focus the next field.
    Down,
    /// Submit the form.
    Enter,
    /// Cancel the flow.
    Esc,
}

/// Text field with focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Email address.
    Email,
    /// Display name.
    DisplayName,
}

/// Result of feeding a key to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    /// Still editing.
    Editing,
    /// User submitted a credential.
    Submitted(Credential),
    /// User dismissed the form.
    Canceled,
}

/// Sign-in modal state.
#[derive(Debug, Clone)]
pub struct SignInForm {
    providers: Vec<IdentityProvider>,
    selected: usize,
    focus: FormField,
    email: String,
    display_name: String,
    error: Option<String>,
}

impl SignInForm {
    /// Create a form offering `providers`. Falls back to email sign-in if
    /// the list is empty.
    pub fn new(providers: &[IdentityProvider]) -> Self {
        let providers =
            if providers.is_empty() { vec![IdentityProvider::Email] } else { providers.to_vec() };
        Self {
            providers,
            selected: 0,
            focus: FormField::Email,
            email: String::new(),
            display_name: String::new(),
            error: None,
        }
    }

    /// Form for the next sign-in attempt.
    ///
    /// After a rejected credential the `previous` form comes back with its
    /// fields intact and `rejection` shown. Otherwise the form starts empty.
    pub fn reopen(
        previous: Option<Self>,
        providers: &[IdentityProvider],
        rejection: Option<&str>,
    ) -> Self {
        match (previous, rejection) {
            (Some(mut form), Some(reason)) => {
                form.set_error(reason);
                form
            },
            _ => Self::new(providers),
        }
    }

    /// Offered providers.
    pub fn providers(&self) -> &[IdentityProvider] {
        &self.providers
    }

    /// Currently selected provider.
    pub fn provider(&self) -> IdentityProvider {
        self.providers[self.selected % self.providers.len()]
    }

    /// Field receiving text input.
    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Email field contents.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Display-name field contents.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Message from the last rejected submit, or the backend's rejection.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show an error above the hints.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    /// Apply a key.
    pub fn handle(&mut self, key: FormKey) -> FormStatus {
        match key {
            FormKey::Char(c) => self.focused_mut().push(c),
            FormKey::Backspace => {
                self.focused_mut().pop();
            },
            FormKey::Tab => self.selected = (self.selected + 1) % self.providers.len(),
            FormKey::Up | FormKey::Down => {
                self.focus = match self.focus {
                    FormField::Email => FormField::DisplayName,
                    FormField::DisplayName => FormField::Email,
                };
            },
            FormKey::Enter => return self.submit(),
            FormKey::Esc => return FormStatus::Canceled,
        }
        FormStatus::Editing
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Email => &mut self.email,
            FormField::DisplayName => &mut self.display_name,
        }
    }

    fn submit(&mut self) -> FormStatus {
        let email = non_blank(&self.email);
        let display_name = non_blank(&self.display_name);

        match self.provider() {
            IdentityProvider::Email if email.is_none() => {
                self.error = Some("Email is required".to_string());
                return FormStatus::Editing;
            },
            IdentityProvider::Google if email.is_none() && display_name.is_none() => {
                self.error = Some("Enter an email or a name".to_string());
                return FormStatus::Editing;
            },
            _ => {},
        }

        self.error = None;
        FormStatus::Submitted(Credential { provider: self.provider(), email, display_name })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
