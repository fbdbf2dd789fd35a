pub mod admins;
pub mod session;
pub mod users;

mod run;

use crate::cli::globals::GlobalArgs;
use crate::routes::{self, Route};
use crate::session::{FileStorage, SessionError, SessionStore};

#[derive(Debug)]
pub enum Action {
    Login(session::LoginArgs),
    Logout(GlobalArgs),
    Whoami(GlobalArgs),
    Users(users::Args),
    Admins(admins::Args),
}

impl Action {
    /// Execute the action and print what it produced.
    ///
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        let output = run::execute(self).await?;
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(())
    }
}

/// Opens the session and lets `route` through only when the guard does.
pub(crate) fn guarded(
    globals: &GlobalArgs,
    route: Route,
) -> Result<SessionStore<FileStorage>, SessionError> {
    let store = globals.session_store();
    match routes::guard(route, &store) {
        Route::Login => Err(SessionError::Unauthenticated),
        _ => Ok(store),
    }
}
