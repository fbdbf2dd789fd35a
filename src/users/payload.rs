//! Shapes a validated [`UserForm`] into the JSON body sent on create and update.

use crate::users::{
    form::UserForm,
    types::{Gender, birthdate},
};
use serde::Serialize;

/// Request body for `POST /users` and `PUT /users/{id}`. Absent optionals are
/// left out of the JSON entirely rather than sent as empty strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_other: Option<String>,
    pub birthdate: String,
}

/// Normalizes form input. Never fails; required fields are checked beforehand
/// by [`UserForm::validate`].
#[must_use]
pub fn build_payload(form: &UserForm) -> UserPayload {
    let website = form.website.trim();
    let birth = form.birthdate.trim();

    UserPayload {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_lowercase(),
        phone: form.phone.trim().to_string(),
        website: (!website.is_empty()).then(|| website.to_string()),
        gender: form.gender,
        gender_other: (form.gender == Gender::Otro).then(|| form.gender_other.clone()),
        birthdate: birthdate::parse_exact(birth).map_or_else(
            || birth.to_string(),
            |date| date.format(birthdate::FORMAT).to_string(),
        ),
    }
}
