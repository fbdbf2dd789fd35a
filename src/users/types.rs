use crate::fields;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Femenino,
    Masculino,
    Otro,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Femenino => "femenino",
            Self::Masculino => "masculino",
            Self::Otro => "otro",
        }
    }

    /// Display label; `other` is only used for [`Gender::Otro`].
    #[must_use]
    pub fn label(self, other: Option<&str>) -> String {
        fields::format_gender_label(self.as_str(), other)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender: {0} (expected femenino, masculino or otro)")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "femenino" => Ok(Self::Femenino),
            "masculino" => Ok(Self::Masculino),
            "otro" => Ok(Self::Otro),
            _ => Err(UnknownGender(value.to_string())),
        }
    }
}

/// A record of the internal user service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub website: Option<String>,
    /// Older rows may not carry a gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub gender_other: Option<String>,
    #[serde(
        default,
        with = "birthdate",
        skip_serializing_if = "Option::is_none"
    )]
    pub birthdate: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Checks that `gender_other` is present exactly when the gender is `otro`.
    ///
    /// # Errors
    /// Returns a description of the violated invariant.
    pub fn check_gender_other(&self) -> Result<(), String> {
        match (self.gender, self.gender_other.is_some()) {
            (Some(Gender::Otro), false) => {
                Err("gender_other is required when gender is otro".to_string())
            }
            (Some(gender @ (Gender::Femenino | Gender::Masculino)), true) => Err(format!(
                "gender_other must be absent when gender is {gender}"
            )),
            (None, true) => Err("gender_other must be absent without a gender".to_string()),
            _ => Ok(()),
        }
    }

    /// Display label; empty when the record has no gender.
    #[must_use]
    pub fn gender_label(&self) -> String {
        self.gender.map_or_else(String::new, |gender| {
            gender.label(self.gender_other.as_deref())
        })
    }

    /// Short date, or [`fields::BIRTHDATE_UNSET`] when the record has none.
    #[must_use]
    pub fn birthdate_label(&self) -> String {
        let iso = self
            .birthdate
            .map(|date| date.format(birthdate::FORMAT).to_string())
            .unwrap_or_default();
        fields::format_birthdate(&iso)
    }
}

/// A record of the external admin directory. Only ever read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub website: Option<String>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.trim().is_empty()))
}

/// `YYYY-MM-DD` on the wire. A full ISO datetime is accepted on receipt and
/// its date part is kept; absent, `null` and blank values decode as `None`.
pub(crate) mod birthdate {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub(crate) const FORMAT: &str = "%Y-%m-%d";

    #[allow(clippy::ref_option)]
    pub(crate) fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.collect_str(&date.format(FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid birthdate: {raw}"))),
            _ => Ok(None),
        }
    }

    /// Lenient read of a received value: only the leading date is kept.
    pub(crate) fn parse(raw: &str) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        let date_part = trimmed.get(..10).unwrap_or(trimmed);
        NaiveDate::parse_from_str(date_part, FORMAT).ok()
    }

    /// Strict read of user input: the whole value must be `YYYY-MM-DD`.
    pub(crate) fn parse_exact(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), FORMAT).ok()
    }
}
