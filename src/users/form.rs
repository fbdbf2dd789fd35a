//! Edit form state for a user record.
//!
//! Field changes go through [`UserForm::apply`], a pure transition, so the
//! dependent `gender_other` field is reset in one place instead of by whatever
//! happens to observe the gender field.

use crate::fields::{
    self, EMAIL_PATTERN_MESSAGE, GENDER_OTHER_REQUIRED_MESSAGE, PHONE_PATTERN_MESSAGE,
    REQUIRED_MESSAGE,
};
use crate::users::types::{Gender, User, birthdate};
use std::{collections::BTreeMap, fmt};

pub const BIRTHDATE_FORMAT_MESSAGE: &str = "Fecha inválida, usar AAAA-MM-DD";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Website,
    Gender,
    GenderOther,
    Birthdate,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Website => "website",
            Self::Gender => "gender",
            Self::GenderOther => "gender_other",
            Self::Birthdate => "birthdate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldChange {
    Name(String),
    Email(String),
    Phone(String),
    Website(String),
    Gender(Gender),
    GenderOther(String),
    Birthdate(String),
}

/// Per-field validation messages, shown next to the field. Never fatal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message; the first one reported for a field wins.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Raw form input. Strings are kept exactly as typed until the payload is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub gender: Gender,
    pub gender_other: String,
    pub birthdate: String,
}

impl UserForm {
    /// Applies one field change. Leaving `otro` clears the qualifier.
    #[must_use]
    pub fn apply(mut self, change: FieldChange) -> Self {
        match change {
            FieldChange::Name(value) => self.name = value,
            FieldChange::Email(value) => self.email = value,
            FieldChange::Phone(value) => self.phone = value,
            FieldChange::Website(value) => self.website = value,
            FieldChange::Gender(value) => {
                self.gender = value;
                if value != Gender::Otro {
                    self.gender_other.clear();
                }
            }
            FieldChange::GenderOther(value) => self.gender_other = value,
            FieldChange::Birthdate(value) => self.birthdate = value,
        }
        self
    }

    /// Applies changes in order.
    #[must_use]
    pub fn apply_all(self, changes: impl IntoIterator<Item = FieldChange>) -> Self {
        changes.into_iter().fold(self, Self::apply)
    }

    /// Form state for editing an existing record.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            website: user.website.clone().unwrap_or_default(),
            gender: user.gender.unwrap_or_default(),
            gender_other: if user.gender == Some(Gender::Otro) {
                user.gender_other.clone().unwrap_or_default()
            } else {
                String::new()
            },
            birthdate: user
                .birthdate
                .map(|date| date.format(birthdate::FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    /// Whether the free-text gender field is shown.
    #[must_use]
    pub fn show_gender_other(&self) -> bool {
        self.gender == Gender::Otro
    }

    /// Runs every field rule and collects the failures.
    ///
    /// # Errors
    /// Returns the failing fields with their messages.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(Field::Name, REQUIRED_MESSAGE);
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert(Field::Email, REQUIRED_MESSAGE);
        } else if !fields::validate_email(email) {
            errors.insert(Field::Email, EMAIL_PATTERN_MESSAGE);
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.insert(Field::Phone, REQUIRED_MESSAGE);
        } else if !fields::validate_phone(phone) {
            errors.insert(Field::Phone, PHONE_PATTERN_MESSAGE);
        }

        if self.show_gender_other() && self.gender_other.trim().is_empty() {
            errors.insert(Field::GenderOther, GENDER_OTHER_REQUIRED_MESSAGE);
        }

        let birth = self.birthdate.trim();
        if birth.is_empty() {
            errors.insert(Field::Birthdate, REQUIRED_MESSAGE);
        } else if birthdate::parse_exact(birth).is_none() {
            errors.insert(Field::Birthdate, BIRTHDATE_FORMAT_MESSAGE);
        }

        errors.into_result()
    }
}
