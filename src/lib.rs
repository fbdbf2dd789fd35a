//! # Usuarios (User Management Console)
//!
//! `usuarios` manages the "user" records of the internal REST API and shows the
//! read-only "admin" records published by an external service.
//!
//! ## Layers
//!
//! - **Field rules** ([`fields`]): email/phone patterns and display helpers for
//!   gender and birthdate. Pure functions.
//! - **Users** ([`users`]): wire records, the edit form state machine, and the
//!   payload builder that shapes a form into the body sent to the API.
//! - **Session** ([`session`]): the locally persisted identity. Login is a
//!   placeholder: any non-empty password is accepted and nothing is verified
//!   against a backend.
//! - **API** ([`api`]): one typed CRUD client per origin with an observer hook
//!   for request logging.
//! - **Routes and views** ([`routes`], [`views`]): the screen table, the
//!   session guard, and the per-screen controllers the CLI drives.
//!
//! Transport failures are terminal for the operation that hit them. Nothing is
//! retried automatically.

pub mod api;
pub mod cli;
pub mod fields;
pub mod routes;
pub mod session;
pub mod users;
pub mod views;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
