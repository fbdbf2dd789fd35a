//! Screen table and the session guard in front of it.

use crate::session::{SessionStorage, SessionStore};
use std::fmt;

pub const LOGIN_PATH: &str = "/login";
pub const USERS_PATH: &str = "/usuarios";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Users,
    UserDetail(u64),
}

impl Route {
    /// Resolves a path. `/`, unknown paths and malformed ids land on the users
    /// list.
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        if trimmed == LOGIN_PATH {
            return Self::Login;
        }

        let Some(rest) = trimmed.strip_prefix(USERS_PATH) else {
            return Self::Users;
        };

        rest.strip_prefix('/')
            .and_then(|id| id.parse::<u64>().ok())
            .filter(|id| *id > 0)
            .map_or(Self::Users, Self::UserDetail)
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => LOGIN_PATH.to_string(),
            Self::Users => USERS_PATH.to_string(),
            Self::UserDetail(id) => user_detail_path(*id),
        }
    }

    #[must_use]
    pub const fn requires_session(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[must_use]
pub fn user_detail_path(id: u64) -> String {
    format!("{USERS_PATH}/{id}")
}

/// Where a navigation actually ends up: protected screens fall back to login
/// while no one is authenticated.
#[must_use]
pub fn guard<S: SessionStorage>(route: Route, session: &SessionStore<S>) -> Route {
    if route.requires_session() && !session.is_authenticated() {
        Route::Login
    } else {
        route
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::MemoryStorage;
    use secrecy::SecretString;

    #[test]
    fn resolves_known_paths() {
        assert_eq!(Route::resolve("/login"), Route::Login);
        assert_eq!(Route::resolve("/usuarios"), Route::Users);
        assert_eq!(Route::resolve("/usuarios/"), Route::Users);
        assert_eq!(Route::resolve("/usuarios/12"), Route::UserDetail(12));
        assert_eq!(Route::resolve("/usuarios/12?tab=edit"), Route::UserDetail(12));
    }

    #[test]
    fn redirects_everything_else_to_users() {
        assert_eq!(Route::resolve("/"), Route::Users);
        assert_eq!(Route::resolve(""), Route::Users);
        assert_eq!(Route::resolve("/foo"), Route::Users);
        assert_eq!(Route::resolve("/usuarios/abc"), Route::Users);
        assert_eq!(Route::resolve("/usuarios/0"), Route::Users);
        assert_eq!(Route::resolve("/usuariosx"), Route::Users);
    }

    #[test]
    fn paths_round_trip() {
        for route in [Route::Login, Route::Users, Route::UserDetail(7)] {
            assert_eq!(Route::resolve(&route.path()), route);
        }
        assert_eq!(Route::UserDetail(7).to_string(), "/usuarios/7");
    }

    #[test]
    fn guard_sends_anonymous_users_to_login() {
        let mut store = SessionStore::open(MemoryStorage::new());
        assert_eq!(guard(Route::Users, &store), Route::Login);
        assert_eq!(guard(Route::UserDetail(1), &store), Route::Login);
        assert_eq!(guard(Route::Login, &store), Route::Login);

        store
            .login("a@gmail.com", &SecretString::from("1234".to_string()))
            .unwrap();
        assert_eq!(guard(Route::Users, &store), Route::Users);
        assert_eq!(guard(Route::UserDetail(1), &store), Route::UserDetail(1));
    }
}
