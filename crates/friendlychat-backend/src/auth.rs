//! Credential verification.

use friendlychat_app::{Credential, IdentityProvider, User};

use crate::BackendError;

/// Turn a credential from the sign-in flow into a signed-in user.
///
/// Email accounts need a well-formed address. Google accounts need either an
/// address or a display name. The uid is stable for the same account, so
/// signing in twice yields the same user.
pub fn authenticate(credential: Credential) -> Result<User, BackendError> {
    let email = non_blank(credential.email);
    let display_name = non_blank(credential.display_name);

    if let Some(address) = &email {
        if !is_valid_email(address) {
            return Err(BackendError::InvalidCredential("malformed email address"));
        }
    }

    let account = match (credential.provider, &email, &display_name) {
        (_, Some(address), _) => address.to_lowercase(),
        (IdentityProvider::Email, None, _) => {
            return Err(BackendError::InvalidCredential("email sign-in needs an address"));
        },
        (IdentityProvider::Google, None, Some(name)) => name.to_lowercase(),
        (IdentityProvider::Google, None, None) => {
            return Err(BackendError::InvalidCredential("account needs an address or a name"));
        },
    };

    Ok(User {
        uid: format!("{}:{account}", credential.provider),
        display_name,
        email,
        provider: credential.provider,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn is_valid_email(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !address.contains(' ')
}
