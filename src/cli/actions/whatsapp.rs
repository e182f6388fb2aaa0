use crate::{
    cli::globals::GlobalArgs,
    mediconnect::{
        FormDraft,
        forms::{Subject, contact},
        links::{contact_message, whatsapp_link},
        storage::{CONTACT_DRAFT_KEY, load_json},
    },
};
use anyhow::{Context, Result};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub subject: Option<Subject>,
    pub message: Option<String>,
}

/// Prints the link. Without a message argument, the subject and message come
/// from the saved contact draft.
/// # Errors
/// Returns an error if the configured phone number does not form a valid link.
pub fn execute(args: &Args) -> Result<()> {
    let saved = if args.message.is_none() {
        load_json::<FormDraft>(&args.globals.store(), CONTACT_DRAFT_KEY)
    } else {
        None
    };

    let message = compose(args.subject, args.message.as_deref(), saved.as_ref());
    let link = whatsapp_link(&args.globals.whatsapp_phone, &message)
        .context("invalid WhatsApp phone number")?;
    println!("{link}");

    Ok(())
}

fn compose(subject: Option<Subject>, message: Option<&str>, saved: Option<&FormDraft>) -> String {
    let subject = subject.or_else(|| {
        saved.and_then(|draft| draft.trimmed(contact::SUBJECT).parse::<Subject>().ok())
    });
    let body = message
        .or_else(|| saved.map(|draft| draft.trimmed(contact::MESSAGE)))
        .unwrap_or_default();

    contact_message(subject.map_or("", Subject::label), body)
}
