//! Validation patterns and display helpers for single user fields.
//!
//! Everything here is pure: validators answer `bool` and formatters fall back to
//! their input instead of failing, so callers can use them while rendering.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

pub const EMAIL_ALLOWED_DOMAINS: [&str; 5] = [
    "gmail.com",
    "hotmail.com",
    "outlook.com",
    "yahoo.com",
    "live.com",
];

const EMAIL_PATTERN: &str =
    r"(?i)^[a-z0-9][a-z0-9._%+-]*@(gmail|hotmail|outlook|yahoo|live)\.com$";

const PHONE_PATTERN: &str = r"^[1-9][0-9]{9}$";

pub const EMAIL_PATTERN_MESSAGE: &str = "El email debe comenzar con letra o número y terminar en: gmail.com, hotmail.com, outlook.com, yahoo.com, live.com";

pub const PHONE_PATTERN_MESSAGE: &str =
    "El teléfono debe tener 10 dígitos numéricos y no puede iniciar con 0";

pub const REQUIRED_MESSAGE: &str = "Requerido";

pub const GENDER_OTHER_REQUIRED_MESSAGE: &str = "Describe el género seleccionado";

/// Shown in place of a missing birthdate.
pub const BIRTHDATE_UNSET: &str = "Sin registrar";

/// Select options for the gender field as `(value, label)`.
pub const GENDER_OPTIONS: [(&str, &str); 3] = [
    ("femenino", "Femenino"),
    ("masculino", "Masculino"),
    ("otro", "Otro"),
];

/// Checks an email against the allowed providers.
///
/// The local part must start with a letter or digit; the match is anchored and
/// case-insensitive.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    Regex::new(EMAIL_PATTERN).is_ok_and(|regex| regex.is_match(email))
}

/// Checks for exactly ten ASCII digits not starting with `0`. No separators are
/// stripped.
#[must_use]
pub fn validate_phone(phone: &str) -> bool {
    Regex::new(PHONE_PATTERN).is_ok_and(|regex| regex.is_match(phone))
}

/// Human label for a gender value. `otro` shows the free-text qualifier when
/// there is one; unknown values are returned as-is.
#[must_use]
pub fn format_gender_label(gender: &str, other: Option<&str>) -> String {
    match gender {
        "femenino" => "Femenino".to_string(),
        "masculino" => "Masculino".to_string(),
        "otro" => match other {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => "Otro".to_string(),
        },
        _ => gender.to_string(),
    }
}

/// Renders an ISO date or datetime as an es-AR short date (`d/m/yyyy`).
///
/// The calendar day is taken in UTC so an offset never moves the date. Empty
/// input yields [`BIRTHDATE_UNSET`]; anything unparseable is returned verbatim.
#[must_use]
pub fn format_birthdate(iso: &str) -> String {
    if iso.is_empty() {
        return BIRTHDATE_UNSET.to_string();
    }

    match parse_utc_date(iso) {
        Some(date) => format_short_date(date),
        None => iso.to_string(),
    }
}

/// es-AR short date, day and month without zero padding.
#[must_use]
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

fn parse_utc_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&Utc).date_naive());
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    // no offset: read as UTC
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|datetime| datetime.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_email_accepts_allowed_domains() {
        assert!(validate_email("a.b@gmail.com"));
        assert!(validate_email("user+tag@hotmail.com"));
        assert!(validate_email("x_1@outlook.com"));
        assert!(validate_email("9lives@yahoo.com"));
        assert!(validate_email("someone@live.com"));
    }

    #[test]
    fn validate_email_is_case_insensitive() {
        assert!(validate_email("A@GMAIL.COM"));
        assert!(validate_email("Mixed.Case@Outlook.Com"));
    }

    #[test]
    fn validate_email_rejects_leading_symbol() {
        assert!(!validate_email(".a@gmail.com"));
        assert!(!validate_email("_a@gmail.com"));
        assert!(!validate_email("+a@gmail.com"));
    }

    #[test]
    fn validate_email_allows_consecutive_symbols_after_first_char() {
        assert!(validate_email("a..b@gmail.com"));
        assert!(validate_email("a%+-_@gmail.com"));
    }

    #[test]
    fn validate_email_rejects_other_domains() {
        assert!(!validate_email("a@aol.com"));
        assert!(!validate_email("a@gmail.com.ar"));
        assert!(!validate_email("a@gmail.org"));
        assert!(!validate_email("a@sub.gmail.com"));
        assert!(!validate_email("a@gmail.com "));
        assert!(!validate_email("agmail.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn allowed_domains_match_pattern_message() {
        for domain in EMAIL_ALLOWED_DOMAINS {
            assert!(validate_email(&format!("user@{domain}")));
            assert!(EMAIL_PATTERN_MESSAGE.contains(domain));
        }
    }

    #[test]
    fn validate_phone_accepts_ten_digits() {
        assert!(validate_phone("1123456789"));
        assert!(validate_phone("9999999999"));
    }

    #[test]
    fn validate_phone_rejects_invalid() {
        assert!(!validate_phone("0123456789"));
        assert!(!validate_phone("12345"));
        assert!(!validate_phone("12345678901"));
        assert!(!validate_phone("112 345 6789"));
        assert!(!validate_phone("112-345-678"));
        assert!(!validate_phone(" 1123456789"));
        assert!(!validate_phone("١١٢٣٤٥٦٧٨٩"));
    }

    #[test]
    fn format_gender_label_known_values() {
        assert_eq!(format_gender_label("femenino", None), "Femenino");
        assert_eq!(format_gender_label("masculino", Some("ignored")), "Masculino");
    }

    #[test]
    fn format_gender_label_other() {
        assert_eq!(format_gender_label("otro", Some("")), "Otro");
        assert_eq!(format_gender_label("otro", None), "Otro");
        assert_eq!(format_gender_label("otro", Some("no binario")), "no binario");
    }

    #[test]
    fn format_gender_label_passes_unknown_through() {
        assert_eq!(format_gender_label("fluido", None), "fluido");
        assert_eq!(format_gender_label("", None), "");
    }

    #[test]
    fn format_birthdate_empty_is_unset() {
        assert_eq!(format_birthdate(""), "Sin registrar");
    }

    #[test]
    fn format_birthdate_keeps_utc_day() {
        assert_eq!(format_birthdate("1990-05-01T00:00:00Z"), "1/5/1990");
        assert_eq!(format_birthdate("1990-05-01"), "1/5/1990");
        assert_eq!(format_birthdate("1990-05-01T23:59:59.500"), "1/5/1990");
    }

    #[test]
    fn format_birthdate_converts_offsets_to_utc() {
        assert_eq!(format_birthdate("1990-05-01T02:00:00+03:00"), "30/4/1990");
        assert_eq!(format_birthdate("1990-04-30T22:00:00-03:00"), "1/5/1990");
    }

    #[test]
    fn format_birthdate_returns_unparseable_verbatim() {
        assert_eq!(format_birthdate("not a date"), "not a date");
        assert_eq!(format_birthdate("1990-13-45"), "1990-13-45");
    }

    #[test]
    fn gender_options_labels_match_formatter() {
        for (value, label) in GENDER_OPTIONS {
            assert_eq!(format_gender_label(value, None), label);
        }
    }
}
