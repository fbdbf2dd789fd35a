use super::Navigation;
use crate::routes::Route;
use crate::session::{SessionError, SessionStorage, SessionStore};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use thiserror::Error;

pub const EMAIL_REQUIRED_MESSAGE: &str = "El email es obligatorio";
pub const PASSWORD_REQUIRED_MESSAGE: &str = "La contraseña es obligatoria";
pub const PASSWORD_MIN_LENGTH_MESSAGE: &str = "Mínimo 4 caracteres";
const PASSWORD_MIN_LENGTH: usize = 4;

/// Inline messages for the login form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl fmt::Display for LoginErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = [("email", self.email), ("password", self.password)]
            .into_iter()
            .filter_map(|(field, message)| message.map(|message| format!("{field}: {message}")))
            .collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for LoginErrors {}

#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    Invalid(#[from] LoginErrors),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Form-level checks that run before the session store is touched.
///
/// # Errors
/// Returns the messages for each failing field.
pub fn validate_login(email: &str, password: &SecretString) -> Result<(), LoginErrors> {
    let mut errors = LoginErrors::default();

    if email.trim().is_empty() {
        errors.email = Some(EMAIL_REQUIRED_MESSAGE);
    }

    let password = password.expose_secret();
    if password.is_empty() {
        errors.password = Some(PASSWORD_REQUIRED_MESSAGE);
    } else if password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.password = Some(PASSWORD_MIN_LENGTH_MESSAGE);
    }

    if errors == LoginErrors::default() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Login screen submit: validate, start the session, go to the users list.
///
/// # Errors
/// Returns the form errors, or the session error if the store refuses.
pub fn submit_login<S: SessionStorage>(
    store: &mut SessionStore<S>,
    email: &str,
    password: &SecretString,
) -> Result<Navigation, LoginError> {
    validate_login(email, password)?;
    store.login(email, password)?;
    Ok(Navigation::to(Route::Users))
}
