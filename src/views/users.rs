//! Users list screen: internal users (editable) and external admins (read-only).

use super::ViewState;
use crate::api::ResourceClient;
use crate::users::{Admin, FieldChange, FieldErrors, User, UserForm, build_payload};
use tracing::warn;

pub const LOAD_USERS_FAILED: &str = "No se pudieron cargar los usuarios";
pub const LOAD_ADMINS_FAILED: &str = "No se pudieron cargar los administradores";
pub const CREATE_FAILED: &str = "No se pudo crear el usuario";
pub const DELETE_FAILED: &str = "No se pudo eliminar el usuario";

pub struct UsersController {
    users_api: ResourceClient<User>,
    admins_api: ResourceClient<Admin>,
    users: ViewState<Vec<User>>,
    admins: ViewState<Vec<Admin>>,
    form: UserForm,
    form_errors: FieldErrors,
    notice: Option<String>,
}

impl UsersController {
    #[must_use]
    pub fn new(users_api: ResourceClient<User>, admins_api: ResourceClient<Admin>) -> Self {
        Self {
            users_api,
            admins_api,
            users: ViewState::Idle,
            admins: ViewState::Idle,
            form: UserForm::default(),
            form_errors: FieldErrors::new(),
            notice: None,
        }
    }

    #[must_use]
    pub fn users(&self) -> &ViewState<Vec<User>> {
        &self.users
    }

    #[must_use]
    pub fn admins(&self) -> &ViewState<Vec<Admin>> {
        &self.admins
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

    /// Shows a notice handed over by the screen that navigated here.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Returns the pending notice and clears it.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Loads both lists. The two requests are independent and run together.
    pub async fn load(&mut self) {
        self.users = ViewState::Loading;
        self.admins = ViewState::Loading;

        let (users, admins) = tokio::join!(self.users_api.list(), self.admins_api.list());
        self.users = into_state(users, LOAD_USERS_FAILED);
        self.admins = into_state(admins, LOAD_ADMINS_FAILED);
    }

    pub async fn refresh(&mut self) {
        self.users = ViewState::Loading;
        self.users = into_state(self.users_api.list().await, LOAD_USERS_FAILED);
    }

    pub async fn refresh_admins(&mut self) {
        self.admins = ViewState::Loading;
        self.admins = into_state(self.admins_api.list().await, LOAD_ADMINS_FAILED);
    }

    /// Validates and submits the form. On success the form is reset and the
    /// list reloaded.
    pub async fn create(&mut self) -> Option<User> {
        if let Err(errors) = self.form.validate() {
            self.form_errors = errors;
            return None;
        }
        self.form_errors = FieldErrors::new();

        match self.users_api.create(&build_payload(&self.form)).await {
            Ok(user) => {
                self.notice = Some(format!("Usuario \"{}\" creado", user.name));
                self.form = UserForm::default();
                self.refresh().await;
                Some(user)
            }
            Err(err) => {
                warn!("create user failed: {err}");
                self.notice = Some(CREATE_FAILED.to_string());
                None
            }
        }
    }

    /// Deletes `user` and reloads the list.
    pub async fn delete(&mut self, user: &User) -> bool {
        match self.users_api.delete(user.id).await {
            Ok(()) => {
                self.notice = Some(format!("Usuario \"{}\" eliminado", user.name));
                self.refresh().await;
                true
            }
            Err(err) => {
                warn!("delete user {} failed: {err}", user.id);
                self.notice = Some(DELETE_FAILED.to_string());
                false
            }
        }
    }
}

fn into_state<T>(result: Result<T, crate::api::ClientError>, message: &str) -> ViewState<T> {
    match result {
        Ok(value) => ViewState::Ready(value),
        Err(err) => {
            warn!("{message}: {err}");
            ViewState::Failed(message.to_string())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::DEFAULT_TIMEOUT;
    use crate::users::{Field, Gender};
    use serde_json::{Value, json};
    use std::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn user_json(id: u64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": "ana@gmail.com",
            "phone": "1123456789",
            "gender": "femenino",
            "birthdate": "1990-05-01"
        })
    }

    fn controller(users: &MockServer, admins: &MockServer) -> UsersController {
        UsersController::new(
            ResourceClient::new(&users.uri(), DEFAULT_TIMEOUT).unwrap(),
            ResourceClient::new(&admins.uri(), DEFAULT_TIMEOUT).unwrap(),
        )
    }

    fn fill_form(controller: &mut UsersController) {
        for change in [
            FieldChange::Name("Ana".to_string()),
            FieldChange::Email("Ana@Gmail.com".to_string()),
            FieldChange::Phone("1123456789".to_string()),
            FieldChange::Gender(Gender::Femenino),
            FieldChange::Birthdate("1990-05-01".to_string()),
        ] {
            controller.edit(change);
        }
    }

    #[tokio::test]
    async fn load_keeps_sections_independent() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let users = MockServer::start().await;
        let admins = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json(1, "Ana")])))
            .mount(&users)
            .await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&admins)
            .await;

        let mut controller = controller(&users, &admins);
        controller.load().await;

        assert_eq!(controller.users().ready().unwrap().len(), 1);
        assert_eq!(controller.admins().error(), Some(LOAD_ADMINS_FAILED));
    }

    #[tokio::test]
    async fn invalid_form_is_not_submitted() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let users = MockServer::start().await;
        let admins = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&users)
            .await;

        let mut controller = controller(&users, &admins);
        controller.edit(FieldChange::Email("x@aol.com".to_string()));
        assert!(controller.create().await.is_none());
        assert!(controller.form_errors().get(Field::Email).is_some());
        assert!(controller.form_errors().get(Field::Name).is_some());
        assert_eq!(controller.take_notice(), None);
    }

    #[tokio::test]
    async fn create_resets_form_and_reloads() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let users = MockServer::start().await;
        let admins = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(201).set_body_json(user_json(4, "Ana")))
            .expect(1)
            .mount(&users)
            .await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json(4, "Ana")])))
            .expect(1)
            .mount(&users)
            .await;

        let mut controller = controller(&users, &admins);
        fill_form(&mut controller);
        let created = controller.create().await.unwrap();

        assert_eq!(created.id, 4);
        assert_eq!(controller.form(), &UserForm::default());
        assert!(controller.form_errors().is_empty());
        assert_eq!(controller.take_notice().as_deref(), Some("Usuario \"Ana\" creado"));
        assert_eq!(controller.take_notice(), None);
        assert_eq!(controller.users().ready().unwrap()[0].id, 4);
    }

    #[tokio::test]
    async fn failed_create_keeps_form_and_reports() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let users = MockServer::start().await;
        let admins = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "detail": "El email ya está registrado"
            })))
            .mount(&users)
            .await;

        let mut controller = controller(&users, &admins);
        fill_form(&mut controller);
        assert!(controller.create().await.is_none());
        assert_eq!(controller.form().name, "Ana");
        assert_eq!(controller.take_notice().as_deref(), Some(CREATE_FAILED));
    }

    #[tokio::test]
    async fn delete_reports_outcome() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let users = MockServer::start().await;
        let admins = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&users)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/users/2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&users)
            .await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&users)
            .await;

        let mut controller = controller(&users, &admins);
        let first: User = serde_json::from_value(user_json(1, "Ana")).unwrap();
        let missing: User = serde_json::from_value(user_json(2, "Beto")).unwrap();

        assert!(controller.delete(&first).await);
        assert_eq!(controller.take_notice().as_deref(), Some("Usuario \"Ana\" eliminado"));
        assert!(controller.users().ready().unwrap().is_empty());

        assert!(!controller.delete(&missing).await);
        assert_eq!(controller.take_notice().as_deref(), Some(DELETE_FAILED));
    }
}
