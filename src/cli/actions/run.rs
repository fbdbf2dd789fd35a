use crate::cli::actions::{Action, admins, session, users};
use anyhow::Result;

/// Execute the provided action and return its printable output.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<String> {
    match action {
        Action::Login(args) => session::login(&args),
        Action::Logout(globals) => session::logout(&globals),
        Action::Whoami(globals) => session::whoami(&globals),
        Action::Users(args) => users::execute(args).await,
        Action::Admins(args) => admins::execute(args).await,
    }
}
