use crate::users::{FieldChange, Gender};
use clap::{Arg, ArgMatches, Command, builder::ValueParser, value_parser};

pub const ARG_ID: &str = "id";
pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PHONE: &str = "phone";
pub const ARG_WEBSITE: &str = "website";
pub const ARG_GENDER: &str = "gender";
pub const ARG_GENDER_OTHER: &str = "gender-other";
pub const ARG_BIRTHDATE: &str = "birthdate";

#[must_use]
pub fn validator_gender() -> ValueParser {
    ValueParser::from(|value: &str| -> Result<Gender, String> {
        value.parse::<Gender>().map_err(|e| e.to_string())
    })
}

fn id_arg() -> Arg {
    Arg::new(ARG_ID)
        .help("User id")
        .required(true)
        .value_parser(value_parser!(u64).range(1..))
}

fn with_field_args(command: Command) -> Command {
    command
        .arg(Arg::new(ARG_NAME).long(ARG_NAME).help("Full name"))
        .arg(
            Arg::new(ARG_EMAIL)
                .long(ARG_EMAIL)
                .help("Email on gmail.com, hotmail.com, outlook.com, yahoo.com or live.com"),
        )
        .arg(
            Arg::new(ARG_PHONE)
                .long(ARG_PHONE)
                .help("Ten digit phone number, not starting with 0"),
        )
        .arg(
            Arg::new(ARG_WEBSITE)
                .long(ARG_WEBSITE)
                .help("Website, leave empty to clear"),
        )
        .arg(
            Arg::new(ARG_GENDER)
                .long(ARG_GENDER)
                .help("femenino, masculino or otro")
                .value_parser(validator_gender()),
        )
        .arg(
            Arg::new(ARG_GENDER_OTHER)
                .long(ARG_GENDER_OTHER)
                .help("Gender description, used with --gender otro"),
        )
        .arg(
            Arg::new(ARG_BIRTHDATE)
                .long(ARG_BIRTHDATE)
                .help("Birthdate as YYYY-MM-DD"),
        )
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new("users")
        .about("Manage internal users")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List users"))
        .subcommand(Command::new("show").about("Show one user").arg(id_arg()))
        .subcommand(with_field_args(
            Command::new("create").about("Create a user"),
        ))
        .subcommand(with_field_args(
            Command::new("update")
                .about("Update the given fields of a user")
                .arg(id_arg()),
        ))
        .subcommand(Command::new("delete").about("Delete a user").arg(id_arg()))
}

/// Form edits in the order a person would make them: the gender comes before
/// its description so switching to `otro` keeps the description.
#[must_use]
pub fn field_changes(matches: &ArgMatches) -> Vec<FieldChange> {
    let text = |id: &str| matches.get_one::<String>(id).cloned();

    [
        text(ARG_NAME).map(FieldChange::Name),
        text(ARG_EMAIL).map(FieldChange::Email),
        text(ARG_PHONE).map(FieldChange::Phone),
        text(ARG_WEBSITE).map(FieldChange::Website),
        matches.get_one::<Gender>(ARG_GENDER).copied().map(FieldChange::Gender),
        text(ARG_GENDER_OTHER).map(FieldChange::GenderOther),
        text(ARG_BIRTHDATE).map(FieldChange::Birthdate),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ArgMatches {
        let matches = Command::new("usuarios")
            .subcommand(subcommand())
            .try_get_matches_from(args)
            .unwrap();
        matches.subcommand_matches("users").unwrap().clone()
    }

    #[test]
    fn changes_follow_field_order() {
        let users = parse(&[
            "usuarios",
            "users",
            "update",
            "3",
            "--gender-other",
            "no binario",
            "--gender",
            "otro",
            "--name",
            "Sam",
        ]);
        let (name, update) = users.subcommand().unwrap();
        assert_eq!(name, "update");
        assert_eq!(update.get_one::<u64>(ARG_ID).copied(), Some(3));
        assert_eq!(
            field_changes(update),
            vec![
                FieldChange::Name("Sam".to_string()),
                FieldChange::Gender(Gender::Otro),
                FieldChange::GenderOther("no binario".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_gender_is_rejected() {
        let result = Command::new("usuarios").subcommand(subcommand()).try_get_matches_from([
            "usuarios", "users", "create", "--gender", "robot",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_id_is_rejected() {
        let result = Command::new("usuarios")
            .subcommand(subcommand())
            .try_get_matches_from(["usuarios", "users", "show", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn create_without_fields_has_no_changes() {
        let users = parse(&["usuarios", "users", "create"]);
        let (_, create) = users.subcommand().unwrap();
        assert!(field_changes(create).is_empty());
    }
}
