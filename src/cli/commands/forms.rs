use crate::mediconnect::forms::Subject;
use clap::{Arg, ArgAction, Command};

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_REMEMBER_ME: &str = "remember-me";
pub const ARG_ROLE: &str = "role";
pub const ARG_FIRST_NAME: &str = "first-name";
pub const ARG_LAST_NAME: &str = "last-name";
pub const ARG_PHONE: &str = "phone";
pub const ARG_SPECIALTY: &str = "specialty";
pub const ARG_ORDER_NUMBER: &str = "order-number";
pub const ARG_ACCEPT_TERMS: &str = "accept-terms";
pub const ARG_SUBJECT: &str = "subject";
pub const ARG_MESSAGE: &str = "message";
pub const ARG_ACCEPT_PRIVACY: &str = "accept-privacy";

/// Checkbox argument: `--flag` ticks it, `--flag false` unticks it, and leaving
/// it out keeps the restored state.
fn checkbox(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .help(help)
        .num_args(0..=1)
        .default_missing_value("true")
        .value_parser(clap::value_parser!(bool))
        .action(ArgAction::Set)
}

fn text(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).help(help)
}

fn password() -> Arg {
    text(ARG_PASSWORD, "Account password")
        .env("MEDICONNECT_PASSWORD")
        .hide_env_values(true)
}

fn identity(command: Command) -> Command {
    command
        .arg(text(ARG_FIRST_NAME, "First name"))
        .arg(text(ARG_LAST_NAME, "Last name"))
        .arg(text(ARG_EMAIL, "Email address"))
        .arg(text(ARG_PHONE, "Phone number, +225 prefix optional"))
}

#[must_use]
pub fn login() -> Command {
    Command::new("login")
        .about("Sign in with email and password")
        .arg(text(ARG_EMAIL, "Email address"))
        .arg(password())
        .arg(checkbox(ARG_REMEMBER_ME, "Remember the email for the next login"))
}

#[must_use]
pub fn forgot_password() -> Command {
    Command::new("forgot-password")
        .about("Email a password reset link")
        .arg(text(ARG_EMAIL, "Email address, defaults to the remembered one"))
}

#[must_use]
pub fn register() -> Command {
    identity(
        Command::new("register")
            .about("Create a patient or doctor account")
            .arg(
                Arg::new(ARG_ROLE)
                    .long("role")
                    .help("Account type")
                    .required(true)
                    .value_parser(["patient", "doctor"]),
            ),
    )
    .arg(password())
    .arg(text(ARG_SPECIALTY, "Medical specialty (doctors only)"))
    .arg(text(ARG_ORDER_NUMBER, "Medical order number (doctors only)"))
    .arg(checkbox(ARG_ACCEPT_TERMS, "Accept the terms of use"))
}

fn subject() -> Arg {
    Arg::new(ARG_SUBJECT)
        .long("subject")
        .help("Message subject")
        .value_parser(Subject::ALL.map(Subject::value))
}

#[must_use]
pub fn contact() -> Command {
    identity(Command::new("contact").about("Send a message to the MediConnect CI team"))
        .arg(subject())
        .arg(text(ARG_MESSAGE, "Message body"))
        .arg(checkbox(ARG_ACCEPT_PRIVACY, "Accept the privacy policy"))
}

#[must_use]
pub fn whatsapp() -> Command {
    Command::new("whatsapp")
        .about("Print a WhatsApp link, pre-filled from the arguments or the saved contact draft")
        .arg(subject())
        .arg(text(ARG_MESSAGE, "Message body"))
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(login())
        .subcommand(forgot_password())
        .subcommand(register())
        .subcommand(contact())
        .subcommand(whatsapp())
        .subcommand_required(true)
}
