use crate::api::{ClientError, ResourceClient};
use crate::cli::commands::api::Options;
use crate::session::{FileStorage, SessionStore};
use crate::users::{Admin, User};
use std::{path::PathBuf, time::Duration};

/// Settings every action needs: where the two services live and where the
/// session is kept.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub admin_api_url: String,
    pub timeout: Duration,
    pub session_file: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            api_url: options.api_url,
            admin_api_url: options.admin_api_url,
            timeout: Duration::from_secs(options.timeout),
            session_file: options.session_file,
        }
    }

    /// Client for the internal users service.
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if the base URL is invalid.
    pub fn users_client(&self) -> Result<ResourceClient<User>, ClientError> {
        ResourceClient::new(&self.api_url, self.timeout)
    }

    /// Client for the external admin directory.
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if the base URL is invalid.
    pub fn admins_client(&self) -> Result<ResourceClient<Admin>, ClientError> {
        ResourceClient::new(&self.admin_api_url, self.timeout)
    }

    #[must_use]
    pub fn session_store(&self) -> SessionStore<FileStorage> {
        SessionStore::open(FileStorage::new(self.session_file.clone()))
    }
}
