//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary executes.

use crate::cli::actions::{Action, admins, session::LoginArgs, users};
use crate::cli::commands::{api, session, users as user_args};
use crate::cli::globals::GlobalArgs;
use anyhow::{Context, Result, bail};
use secrecy::SecretString;
use std::io::{self, BufRead};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let globals = GlobalArgs::new(api::Options::parse(matches)?);

    let action = match matches.subcommand() {
        Some(("login", sub_m)) => Action::Login(LoginArgs {
            globals,
            email: sub_m
                .get_one::<String>(session::ARG_EMAIL)
                .cloned()
                .context("missing required argument: --email")?,
            password: match sub_m.get_one::<String>(session::ARG_PASSWORD) {
                Some(password) => SecretString::from(password.clone()),
                None => read_password(io::stdin().lock())?,
            },
        }),
        Some(("logout", _)) => Action::Logout(globals),
        Some(("whoami", _)) => Action::Whoami(globals),
        Some(("users", sub_m)) => Action::Users(users::Args {
            globals,
            command: users_command(sub_m)?,
        }),
        Some(("admins", _)) => Action::Admins(admins::Args { globals }),
        Some((name, _)) => bail!("unknown command: {name}"),
        None => bail!("missing command"),
    };

    Ok(action)
}

/// Reads the password from the first line of `reader`, without its line ending.
fn read_password<R: BufRead>(mut reader: R) -> Result<SecretString> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        bail!("missing password: use USUARIOS_PASSWORD, stdin or --password");
    }
    Ok(SecretString::from(password.to_string()))
}

fn users_command(matches: &clap::ArgMatches) -> Result<users::Command> {
    let id = |sub_m: &clap::ArgMatches| {
        sub_m
            .get_one::<u64>(user_args::ARG_ID)
            .copied()
            .context("missing required argument: <id>")
    };

    Ok(match matches.subcommand() {
        Some(("list", _)) => users::Command::List,
        Some(("show", sub_m)) => users::Command::Show(id(sub_m)?),
        Some(("create", sub_m)) => users::Command::Create(user_args::field_changes(sub_m)),
        Some(("update", sub_m)) => users::Command::Update {
            id: id(sub_m)?,
            changes: user_args::field_changes(sub_m),
        },
        Some(("delete", sub_m)) => users::Command::Delete(id(sub_m)?),
        Some((name, _)) => bail!("unknown users command: {name}"),
        None => bail!("missing users command"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use crate::users::{FieldChange, Gender};
    use secrecy::ExposeSecret;

    fn dispatch(args: &[&str]) -> Action {
        temp_env::with_vars(
            [
                ("USUARIOS_API_URL", None::<&str>),
                ("USUARIOS_SESSION_FILE", Some("/tmp/usuarios-dispatch/session.json")),
                ("USUARIOS_EMAIL", None),
                ("USUARIOS_PASSWORD", None),
            ],
            || handler(&commands::new().get_matches_from(args)).unwrap(),
        )
    }

    #[test]
    fn login_keeps_password_secret() {
        let Action::Login(args) = dispatch(&[
            "usuarios",
            "login",
            "--email",
            "ana@gmail.com",
            "--password",
            "hunter22",
        ]) else {
            panic!("expected login");
        };
        assert_eq!(args.email, "ana@gmail.com");
        assert_eq!(args.password.expose_secret(), "hunter22");
        assert!(!format!("{args:?}").contains("hunter22"));
    }

    #[test]
    fn password_is_read_from_first_line() {
        let password = read_password(io::Cursor::new("hunter22\r\nignored\n")).unwrap();
        assert_eq!(password.expose_secret(), "hunter22");

        let password = read_password(io::Cursor::new(" spaced pass ")).unwrap();
        assert_eq!(password.expose_secret(), " spaced pass ");

        assert!(read_password(io::Cursor::new("")).is_err());
        assert!(read_password(io::Cursor::new("\n")).is_err());
    }

    #[test]
    fn users_update() {
        let Action::Users(args) = dispatch(&[
            "usuarios",
            "users",
            "update",
            "12",
            "--gender",
            "masculino",
        ]) else {
            panic!("expected users");
        };
        assert_eq!(args.globals.api_url, api::DEFAULT_API_URL);
        let users::Command::Update { id, changes } = args.command else {
            panic!("expected update");
        };
        assert_eq!(id, 12);
        assert_eq!(changes, vec![FieldChange::Gender(Gender::Masculino)]);
    }

    #[test]
    fn session_commands() {
        assert!(matches!(dispatch(&["usuarios", "logout"]), Action::Logout(_)));
        assert!(matches!(dispatch(&["usuarios", "whoami"]), Action::Whoami(_)));
        assert!(matches!(
            dispatch(&["usuarios", "admins", "list"]),
            Action::Admins(_)
        ));
        assert!(matches!(
            dispatch(&["usuarios", "users", "delete", "3"]),
            Action::Users(users::Args {
                command: users::Command::Delete(3),
                ..
            })
        ));
    }
}
