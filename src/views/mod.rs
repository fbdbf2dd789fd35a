//! Per-screen controllers.
//!
//! A controller owns the data its screen shows and is the only thing that
//! mutates it. Client failures stop at this boundary: they are logged and turned
//! into a transient notice, never returned to the caller.

pub mod detail;
pub mod login;
pub mod users;

pub use detail::UserDetailController;
pub use login::{LoginError, LoginErrors, submit_login};
pub use users::UsersController;

use crate::routes::Route;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> ViewState<T> {
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// A screen change requested by a controller, with a notice for the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub to: Route,
    pub notice: Option<String>,
}

impl Navigation {
    #[must_use]
    pub fn to(route: Route) -> Self {
        Self {
            to: route,
            notice: None,
        }
    }

    #[must_use]
    pub fn with_notice(route: Route, notice: impl Into<String>) -> Self {
        Self {
            to: route,
            notice: Some(notice.into()),
        }
    }
}
