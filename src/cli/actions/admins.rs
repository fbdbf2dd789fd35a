use crate::cli::actions::guarded;
use crate::cli::globals::GlobalArgs;
use crate::routes::Route;
use crate::users::Admin;
use crate::views::UsersController;
use anyhow::{Result, bail};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
}

/// Lists the external admin directory. There is no write path.
///
/// # Errors
/// Returns an error without a session or when the directory cannot be read.
pub async fn execute(args: Args) -> Result<String> {
    guarded(&args.globals, Route::Users)?;

    let mut controller = UsersController::new(
        args.globals.users_client()?,
        args.globals.admins_client()?,
    );
    controller.refresh_admins().await;

    if let Some(message) = controller.admins().error() {
        bail!("{message}");
    }
    let admins = controller.admins().ready().map_or(&[][..], Vec::as_slice);
    if admins.is_empty() {
        return Ok("No hay administradores".to_string());
    }
    Ok(admins.iter().map(render_row).collect::<Vec<_>>().join("\n"))
}

#[must_use]
pub fn render_row(admin: &Admin) -> String {
    let mut row = format!(
        "{:>4}  {}  <{}>  {}",
        admin.id, admin.name, admin.email, admin.phone
    );
    if let Some(website) = &admin.website {
        row.push_str("  ");
        row.push_str(website);
    }
    row
}
