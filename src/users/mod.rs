//! User records, the edit form, and the request payload built from it.

pub mod form;
pub mod payload;
pub mod types;

pub use form::{Field, FieldChange, FieldErrors, UserForm};
pub use payload::{UserPayload, build_payload};
pub use types::{Admin, Gender, UnknownGender, User};
