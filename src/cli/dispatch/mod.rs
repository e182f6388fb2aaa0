use crate::{
    cli::{
        actions::{Action, contact, forgot_password, login, register, whatsapp},
        commands::{backend as backend_args, forms as form_args},
        globals::GlobalArgs,
    },
    mediconnect::{
        FormDraft,
        forms::{
            Role, Subject, contact as contact_form, login as login_form, password_reset,
            registration::{ORDER_NUMBER, SPECIALTY},
        },
    },
};
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = global_args(matches)?;

    match matches.subcommand() {
        Some(("login", sub)) => {
            let mut input = FormDraft::new(login_form::FORM_ID);
            put_text(&mut input, sub, form_args::ARG_EMAIL, login_form::EMAIL);
            put_text(&mut input, sub, form_args::ARG_PASSWORD, login_form::PASSWORD);
            put_flag(&mut input, sub, form_args::ARG_REMEMBER_ME, login_form::REMEMBER_ME);

            Ok(Action::Login(login::Args { globals, input }))
        }
        Some(("forgot-password", sub)) => {
            let mut input = FormDraft::new(password_reset::FORM_ID);
            put_text(&mut input, sub, form_args::ARG_EMAIL, login_form::EMAIL);

            Ok(Action::ForgotPassword(forgot_password::Args { globals, input }))
        }
        Some(("register", sub)) => {
            let role: Role = sub
                .get_one::<String>(form_args::ARG_ROLE)
                .context("missing required argument: --role")?
                .parse()
                .map_err(|err: String| anyhow!(err))?;
            let fields = role.fields();

            let mut input = FormDraft::new(role.form_id());
            put_text(&mut input, sub, form_args::ARG_FIRST_NAME, fields.first_name);
            put_text(&mut input, sub, form_args::ARG_LAST_NAME, fields.last_name);
            put_text(&mut input, sub, form_args::ARG_EMAIL, fields.email);
            put_text(&mut input, sub, form_args::ARG_PHONE, fields.phone);
            put_text(&mut input, sub, form_args::ARG_PASSWORD, fields.password);
            if role == Role::Doctor {
                put_text(&mut input, sub, form_args::ARG_SPECIALTY, SPECIALTY);
                put_text(&mut input, sub, form_args::ARG_ORDER_NUMBER, ORDER_NUMBER);
            }
            put_flag(&mut input, sub, form_args::ARG_ACCEPT_TERMS, fields.terms);

            Ok(Action::Register(register::Args {
                globals,
                role,
                input,
            }))
        }
        Some(("contact", sub)) => {
            let mut input = FormDraft::new(contact_form::FORM_ID);
            put_text(&mut input, sub, form_args::ARG_FIRST_NAME, contact_form::FIRST_NAME);
            put_text(&mut input, sub, form_args::ARG_LAST_NAME, contact_form::LAST_NAME);
            put_text(&mut input, sub, form_args::ARG_EMAIL, contact_form::EMAIL);
            put_text(&mut input, sub, form_args::ARG_PHONE, contact_form::PHONE);
            put_text(&mut input, sub, form_args::ARG_SUBJECT, contact_form::SUBJECT);
            put_text(&mut input, sub, form_args::ARG_MESSAGE, contact_form::MESSAGE);
            put_flag(&mut input, sub, form_args::ARG_ACCEPT_PRIVACY, contact_form::PRIVACY);

            Ok(Action::Contact(contact::Args {
                globals,
                subject: subject(sub)?,
                input,
            }))
        }
        Some(("whatsapp", sub)) => Ok(Action::Whatsapp(whatsapp::Args {
            globals,
            subject: subject(sub)?,
            message: sub.get_one::<String>(form_args::ARG_MESSAGE).cloned(),
        })),
        _ => Err(anyhow!("no subcommand given, see --help")),
    }
}

fn global_args(matches: &ArgMatches) -> Result<GlobalArgs> {
    let storage_dir = matches
        .get_one::<String>(backend_args::ARG_STORAGE_DIR)
        .cloned()
        .context("missing required argument: --storage-dir")?;

    let mut globals = GlobalArgs::new(storage_dir);

    globals.supabase_url = matches
        .get_one::<String>(backend_args::ARG_SUPABASE_URL)
        .map(String::as_str)
        .map(Url::parse)
        .transpose()
        .context("invalid MEDICONNECT_SUPABASE_URL")?;
    globals.supabase_key = matches
        .get_one::<String>(backend_args::ARG_SUPABASE_KEY)
        .map(|key| SecretString::from(key.clone()));

    if let Some(timeout) = matches.get_one::<u64>(backend_args::ARG_TIMEOUT) {
        globals.timeout = Duration::from_secs(*timeout);
    }
    if let Some(phone) = matches.get_one::<String>(backend_args::ARG_WHATSAPP_PHONE) {
        globals.whatsapp_phone.clone_from(phone);
    }

    Ok(globals)
}

fn subject(matches: &ArgMatches) -> Result<Option<Subject>> {
    matches
        .get_one::<String>(form_args::ARG_SUBJECT)
        .map(|value| value.parse::<Subject>().map_err(|err| anyhow!(err)))
        .transpose()
}

fn put_text(draft: &mut FormDraft, matches: &ArgMatches, arg: &str, field: &str) {
    if let Some(value) = matches.get_one::<String>(arg) {
        draft.set(field, value.as_str());
    }
}

fn put_flag(draft: &mut FormDraft, matches: &ArgMatches, arg: &str, field: &str) {
    if let Some(value) = matches.get_one::<bool>(arg) {
        draft.set(field, *value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    const VARS: [&str; 7] = [
        "MEDICONNECT_SUPABASE_URL",
        "MEDICONNECT_SUPABASE_KEY",
        "MEDICONNECT_STORAGE_DIR",
        "MEDICONNECT_TIMEOUT",
        "MEDICONNECT_WHATSAPP_PHONE",
        "MEDICONNECT_PASSWORD",
        "MEDICONNECT_LOG_LEVEL",
    ];

    fn dispatch(args: &[&str]) -> Result<Action> {
        temp_env::with_vars(VARS.map(|var| (var, None::<String>)), || {
            let matches = commands::new().try_get_matches_from(args)?;
            handler(&matches)
        })
    }

    #[test]
    fn test_login_action() -> Result<()> {
        let action = dispatch(&[
            "mediconnect",
            "--supabase-url",
            "https://demo.supabase.co",
            "--supabase-key",
            "anon-key",
            "login",
            "--email",
            "awa@clinique.ci",
            "--password",
            "motdepasse",
            "--remember-me",
        ])?;

        let Action::Login(args) = action else {
            panic!("expected a login action");
        };
        assert_eq!(args.input.text(login_form::EMAIL), "awa@clinique.ci");
        assert!(args.input.flag(login_form::REMEMBER_ME));
        assert_eq!(
            args.globals.supabase_key.as_ref().map(ExposeSecret::expose_secret),
            Some("anon-key")
        );
        assert_eq!(args.globals.timeout, Duration::from_secs(10));
        Ok(())
    }

    #[test]
    fn test_forgot_password_action() -> Result<()> {
        let action = dispatch(&["mediconnect", "forgot-password", "--email", "awa@clinique.ci"])?;

        let Action::ForgotPassword(args) = action else {
            panic!("expected a forgot-password action");
        };
        assert_eq!(args.input.form, password_reset::FORM_ID);
        assert_eq!(args.input.text(login_form::EMAIL), "awa@clinique.ci");
        Ok(())
    }

    #[test]
    fn test_register_doctor_action() -> Result<()> {
        let action = dispatch(&[
            "mediconnect",
            "register",
            "--role",
            "doctor",
            "--first-name",
            "Kofi",
            "--specialty",
            "cardiologie",
            "--accept-terms",
        ])?;

        let Action::Register(args) = action else {
            panic!("expected a register action");
        };
        assert_eq!(args.role, Role::Doctor);
        assert_eq!(args.input.form, "doctorForm");
        assert_eq!(args.input.text("doctorFirstName"), "Kofi");
        assert_eq!(args.input.text("specialty"), "cardiologie");
        assert!(args.input.flag("doctorTerms"));
        assert!(!args.input.fields.contains_key("doctorEmail"));
        Ok(())
    }

    #[test]
    fn test_patient_ignores_doctor_fields() -> Result<()> {
        let action = dispatch(&[
            "mediconnect",
            "register",
            "--role",
            "patient",
            "--order-number",
            "CI-12345",
        ])?;

        let Action::Register(args) = action else {
            panic!("expected a register action");
        };
        assert!(args.input.fields.is_empty());
        Ok(())
    }

    #[test]
    fn test_contact_and_whatsapp_subject() -> Result<()> {
        let action = dispatch(&["mediconnect", "contact", "--subject", "partnership"])?;
        let Action::Contact(args) = action else {
            panic!("expected a contact action");
        };
        assert_eq!(args.subject, Some(Subject::Partnership));
        assert_eq!(args.input.text(contact_form::SUBJECT), "partnership");

        let action = dispatch(&["mediconnect", "whatsapp", "--message", "Bonjour"])?;
        let Action::Whatsapp(args) = action else {
            panic!("expected a whatsapp action");
        };
        assert_eq!(args.message.as_deref(), Some("Bonjour"));
        assert_eq!(args.globals.whatsapp_phone, "225XXXXXXXXX");
        Ok(())
    }

    #[test]
    fn test_invalid_supabase_url() {
        let result = dispatch(&["mediconnect", "--supabase-url", "not a url", "whatsapp"]);
        assert!(result.is_err());
    }
}
