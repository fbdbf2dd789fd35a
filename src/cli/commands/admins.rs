use clap::Command;

#[must_use]
pub fn subcommand() -> Command {
    Command::new("admins")
        .about("Browse the external admin directory (read-only)")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List admins"))
}
