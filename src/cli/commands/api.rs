use clap::{Arg, Command, value_parser};
use std::path::PathBuf;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_ADMIN_API_URL: &str = "admin-api-url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_SESSION_FILE: &str = "session-file";

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_ADMIN_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// `<config dir>/usuarios/session.json`, or a file in the working directory
/// when the platform has no config dir.
#[must_use]
pub fn default_session_file() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from(".usuarios-session.json"),
        |dir| dir.join("usuarios").join("session.json"),
    )
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the users API")
                .env("USUARIOS_API_URL")
                .default_value(DEFAULT_API_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_ADMIN_API_URL)
                .long(ARG_ADMIN_API_URL)
                .help("Base URL of the read-only admin directory")
                .env("USUARIOS_ADMIN_API_URL")
                .default_value(DEFAULT_ADMIN_API_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("USUARIOS_TIMEOUT")
                .default_value("10")
                .global(true)
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long(ARG_SESSION_FILE)
                .help("Where the login session is stored [default: <config dir>/usuarios/session.json]")
                .env("USUARIOS_SESSION_FILE")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
}

/// Connection and storage settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Options {
    pub api_url: String,
    pub admin_api_url: String,
    pub timeout: u64,
    pub session_file: PathBuf,
}

impl Options {
    /// Parse connection options from CLI matches.
    ///
    /// # Errors
    /// Returns an error if a defaulted argument is missing.
    pub fn parse(matches: &clap::ArgMatches) -> anyhow::Result<Self> {
        use anyhow::Context;

        let api_url = matches
            .get_one::<String>(ARG_API_URL)
            .cloned()
            .context("missing required argument: --api-url")?;
        let admin_api_url = matches
            .get_one::<String>(ARG_ADMIN_API_URL)
            .cloned()
            .context("missing required argument: --admin-api-url")?;
        let timeout = matches.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(10);
        let session_file = matches
            .get_one::<PathBuf>(ARG_SESSION_FILE)
            .cloned()
            .unwrap_or_else(default_session_file);

        Ok(Self {
            api_url,
            admin_api_url,
            timeout,
            session_file,
        })
    }
}
