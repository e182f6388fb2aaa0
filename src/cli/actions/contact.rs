use super::submit::submit_form;
use crate::{
    cli::globals::GlobalArgs,
    mediconnect::{
        FormDraft,
        forms::{ContactForm, Subject, contact::MESSAGE},
    },
};
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub subject: Option<Subject>,
    pub input: FormDraft,
}

/// # Errors
/// Returns an error if the form is invalid or the message cannot be stored.
pub async fn execute(args: Args) -> Result<()> {
    if let Some(subject) = args.subject {
        if args.input.trimmed(MESSAGE).is_empty() {
            println!("{}", subject.help_text());
        }
    }

    submit_form(
        &args.globals,
        &ContactForm::new(),
        args.input,
        "Envoyer le message",
    )
    .await
}
