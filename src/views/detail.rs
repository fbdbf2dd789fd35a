//! User detail screen: load one record into the edit form, save or delete it.

use super::{Navigation, ViewState};
use crate::api::ResourceClient;
use crate::routes::Route;
use crate::users::{FieldChange, FieldErrors, User, UserForm, build_payload};
use tracing::warn;

pub const LOAD_FAILED: &str = "No se pudo cargar el usuario";
pub const UPDATE_FAILED: &str = "No se pudo actualizar el usuario";
pub const DELETE_FAILED: &str = "No se pudo eliminar el usuario";
pub const UPDATED: &str = "Usuario actualizado";
pub const DELETED: &str = "Usuario eliminado";

pub struct UserDetailController {
    api: ResourceClient<User>,
    id: u64,
    user: ViewState<User>,
    form: UserForm,
    form_errors: FieldErrors,
    notice: Option<String>,
}

impl UserDetailController {
    #[must_use]
    pub fn new(api: ResourceClient<User>, id: u64) -> Self {
        Self {
            api,
            id,
            user: ViewState::Idle,
            form: UserForm::default(),
            form_errors: FieldErrors::new(),
            notice: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn user(&self) -> &ViewState<User> {
        &self.user
    }

    #[must_use]
    pub fn form(&self) -> &UserForm {
        &self.form
    }

    #[must_use]
    pub fn form_errors(&self) -> &FieldErrors {
        &self.form_errors
    }

    pub fn edit(&mut self, change: FieldChange) {
        self.form = std::mem::take(&mut self.form).apply(change);
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Fetches the record and resets the form from it.
    pub async fn load(&mut self) {
        self.user = ViewState::Loading;
        match self.api.get(self.id).await {
            Ok(user) => {
                self.form = UserForm::from_user(&user);
                self.form_errors = FieldErrors::new();
                self.user = ViewState::Ready(user);
            }
            Err(err) => {
                warn!("load user {} failed: {err}", self.id);
                self.user = ViewState::Failed(LOAD_FAILED.to_string());
            }
        }
    }

    /// Validates and saves the form. Success navigates back to the list.
    pub async fn update(&mut self) -> Option<Navigation> {
        if let Err(errors) = self.form.validate() {
            self.form_errors = errors;
            return None;
        }
        self.form_errors = FieldErrors::new();

        match self.api.update(self.id, &build_payload(&self.form)).await {
            Ok(user) => {
                self.user = ViewState::Ready(user);
                Some(Navigation::with_notice(Route::Users, UPDATED))
            }
            Err(err) => {
                warn!("update user {} failed: {err}", self.id);
                self.notice = Some(UPDATE_FAILED.to_string());
                None
            }
        }
    }

    /// Deletes the record. Success navigates back to the list.
    pub async fn delete(&mut self) -> Option<Navigation> {
        match self.api.delete(self.id).await {
            Ok(()) => Some(Navigation::with_notice(Route::Users, DELETED)),
            Err(err) => {
                warn!("delete user {} failed: {err}", self.id);
                self.notice = Some(DELETE_FAILED.to_string());
                None
            }
        }
    }
}
