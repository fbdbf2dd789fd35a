use crate::cli::actions::guarded;
use crate::cli::globals::GlobalArgs;
use crate::fields::format_short_date;
use crate::routes::Route;
use crate::users::{FieldChange, FieldErrors, User};
use crate::views::{UserDetailController, UsersController};
use anyhow::{Result, anyhow, bail};
use std::fmt::Write as _;

#[derive(Debug)]
pub enum Command {
    List,
    Show(u64),
    Create(Vec<FieldChange>),
    Update { id: u64, changes: Vec<FieldChange> },
    Delete(u64),
}

impl Command {
    const fn route(&self) -> Route {
        match self {
            Self::List | Self::Create(_) => Route::Users,
            Self::Show(id) | Self::Update { id, .. } | Self::Delete(id) => Route::UserDetail(*id),
        }
    }
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub command: Command,
}

/// # Errors
/// Returns an error without a session, on invalid input, or when the backend
/// request fails.
pub async fn execute(args: Args) -> Result<String> {
    guarded(&args.globals, args.command.route())?;
    let users_api = args.globals.users_client()?;

    match args.command {
        Command::List => {
            let admins_api = args.globals.admins_client()?;
            let mut controller = UsersController::new(users_api, admins_api);
            controller.refresh().await;
            list(&controller)
        }
        Command::Create(changes) => {
            let admins_api = args.globals.admins_client()?;
            let mut controller = UsersController::new(users_api, admins_api);
            for change in changes {
                controller.edit(change);
            }
            match controller.create().await {
                Some(user) => Ok(with_notice(controller.take_notice(), &render_row(&user))),
                None => {
                    let notice = controller.take_notice();
                    Err(rejected(controller.form_errors(), notice))
                }
            }
        }
        Command::Show(id) => {
            let mut controller = UserDetailController::new(users_api, id);
            controller.load().await;
            loaded(&controller).map(render_detail)
        }
        Command::Update { id, changes } => {
            let mut controller = UserDetailController::new(users_api, id);
            controller.load().await;
            loaded(&controller)?;
            for change in changes {
                controller.edit(change);
            }
            let Some(navigation) = controller.update().await else {
                let notice = controller.take_notice();
                return Err(rejected(controller.form_errors(), notice));
            };
            let detail = loaded(&controller).map(render_detail)?;
            Ok(with_notice(navigation.notice, &detail))
        }
        Command::Delete(id) => {
            let mut controller = UserDetailController::new(users_api, id);
            match controller.delete().await {
                Some(navigation) => Ok(navigation.notice.unwrap_or_default()),
                None => Err(rejected(&FieldErrors::new(), controller.take_notice())),
            }
        }
    }
}

fn list(controller: &UsersController) -> Result<String> {
    if let Some(message) = controller.users().error() {
        bail!("{message}");
    }
    let users = controller.users().ready().map_or(&[][..], Vec::as_slice);
    if users.is_empty() {
        return Ok("No hay usuarios registrados".to_string());
    }
    Ok(users.iter().map(render_row).collect::<Vec<_>>().join("\n"))
}

fn loaded(controller: &UserDetailController) -> Result<&User> {
    if let Some(message) = controller.user().error() {
        bail!("{message}");
    }
    controller
        .user()
        .ready()
        .ok_or_else(|| anyhow!("user {} not loaded", controller.id()))
}

fn rejected(errors: &FieldErrors, notice: Option<String>) -> anyhow::Error {
    if errors.is_empty() {
        anyhow!(notice.unwrap_or_else(|| "request failed".to_string()))
    } else {
        anyhow!(errors.clone())
    }
}

fn with_notice(notice: Option<String>, body: &str) -> String {
    match notice {
        Some(notice) => format!("{notice}\n{body}"),
        None => body.to_string(),
    }
}

/// One line per user for the list view.
#[must_use]
pub fn render_row(user: &User) -> String {
    format!(
        "{:>4}  {}  <{}>  {}  {}  {}",
        user.id,
        user.name,
        user.email,
        user.phone,
        user.gender_label(),
        user.birthdate_label()
    )
}

#[must_use]
pub fn render_detail(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:         {}", user.id);
    let _ = writeln!(out, "Nombre:     {}", user.name);
    let _ = writeln!(out, "Email:      {}", user.email);
    let _ = writeln!(out, "Teléfono:   {}", user.phone);
    let _ = writeln!(
        out,
        "Sitio web:  {}",
        user.website.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "Género:     {}", user.gender_label());
    let _ = write!(out, "Nacimiento: {}", user.birthdate_label());
    if let Some(created_at) = user.created_at {
        let _ = write!(
            out,
            "\nCreado:     {}",
            format_short_date(created_at.date_naive())
        );
    }
    out
}
