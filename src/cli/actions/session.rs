use crate::cli::globals::GlobalArgs;
use crate::views::submit_login;
use anyhow::{Context, Result};
use secrecy::SecretString;

#[derive(Debug)]
pub struct LoginArgs {
    pub globals: GlobalArgs,
    pub email: String,
    pub password: SecretString,
}

/// # Errors
/// Returns the login form errors, or an error if the session cannot be saved.
pub fn login(args: &LoginArgs) -> Result<String> {
    let mut store = args.globals.session_store();
    let navigation = submit_login(&mut store, &args.email, &args.password)?;
    let session = store.require()?;
    Ok(format!(
        "Sesión iniciada como {} <{}>, continuar en {}",
        session.name, session.email, navigation.to
    ))
}

/// # Errors
/// Returns an error if the stored session cannot be removed.
pub fn logout(globals: &GlobalArgs) -> Result<String> {
    let mut store = globals.session_store();
    let had_session = store.is_authenticated();
    store.logout().with_context(|| {
        format!(
            "failed to remove session file {}",
            globals.session_file.display()
        )
    })?;
    Ok(if had_session {
        "Sesión cerrada".to_string()
    } else {
        "No había una sesión activa".to_string()
    })
}

/// # Errors
/// Returns `Unauthenticated` when no one is logged in.
pub fn whoami(globals: &GlobalArgs) -> Result<String> {
    let store = globals.session_store();
    let session = store.require()?;
    Ok(format!("{} <{}>", session.name, session.email))
}
