use clap::{Arg, Command};

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";

#[must_use]
pub fn login() -> Command {
    Command::new("login")
        .about("Start a session")
        .arg(
            Arg::new(ARG_EMAIL)
                .long(ARG_EMAIL)
                .help("Account email")
                .env("USUARIOS_EMAIL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Account password (prefer USUARIOS_PASSWORD or stdin)")
                .long_help(
                    "Account password. When neither this flag nor USUARIOS_PASSWORD is set, \
                     one line is read from stdin. Flag values show up in the process list \
                     and shell history.",
                )
                .env("USUARIOS_PASSWORD")
                .hide_env_values(true),
        )
}

#[must_use]
pub fn logout() -> Command {
    Command::new("logout").about("End the current session")
}

#[must_use]
pub fn whoami() -> Command {
    Command::new("whoami").about("Show who is logged in")
}

