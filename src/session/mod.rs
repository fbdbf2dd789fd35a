//! Locally persisted identity.
//!
//! The store is either anonymous or holds a [`Session`]. Every transition is
//! written to the backing [`SessionStorage`] before it returns, and a new store
//! rehydrates from that storage, so a restart keeps the user logged in.
//!
//! Login is a placeholder: any non-empty email/password pair is accepted and the
//! display name is derived from the email. No credential ever reaches a backend.

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub name: String,
}

impl Session {
    /// Identity for an email; the name is its local part.
    #[must_use]
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or_default().to_string();
        Self {
            email: email.to_string(),
            name,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("email and password are required")]
    InvalidCredentials,
    #[error("unauthenticated: log in first")]
    Unauthenticated,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct SessionStore<S> {
    storage: S,
    current: Option<Session>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Opens the store and rehydrates any persisted identity. Unreadable or
    /// corrupt entries leave the store anonymous.
    pub fn open(storage: S) -> Self {
        let current = match storage.load() {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(err) => {
                    warn!("ignoring corrupt persisted session: {err}");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!("failed to read persisted session: {err}");
                None
            }
        };

        Self { storage, current }
    }

    /// Starts a session for `email`.
    ///
    /// # Errors
    /// Returns `InvalidCredentials` if either value is empty, or a storage error
    /// if the identity cannot be persisted (the store then stays as it was).
    pub fn login(&mut self, email: &str, password: &SecretString) -> Result<&Session, SessionError> {
        let email = email.trim();
        if email.is_empty() || password.expose_secret().is_empty() {
            return Err(SessionError::InvalidCredentials);
        }

        let session = Session::from_email(email);
        self.storage.save(&serde_json::to_string(&session)?)?;
        info!(email = %session.email, "session started");

        Ok(self.current.insert(session))
    }

    /// Ends the session. The store is anonymous afterwards even if clearing the
    /// storage fails.
    ///
    /// # Errors
    /// Returns a storage error if the persisted entry cannot be removed.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        if let Some(session) = self.current.take() {
            info!(email = %session.email, "session ended");
        }
        self.storage.clear()?;
        Ok(())
    }

    #[must_use]
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// The current identity, for callers that need one.
    ///
    /// # Errors
    /// Returns `Unauthenticated` when no one is logged in.
    pub fn require(&self) -> Result<&Session, SessionError> {
        self.current.as_ref().ok_or(SessionError::Unauthenticated)
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
