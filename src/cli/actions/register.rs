use super::submit::submit_form;
use crate::{
    cli::globals::GlobalArgs,
    mediconnect::{
        FormDraft,
        forms::{RegistrationForm, Role},
    },
};
use anyhow::Result;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub role: Role,
    pub input: FormDraft,
}

/// # Errors
/// Returns an error if the form is invalid or the account cannot be created.
pub async fn execute(args: Args) -> Result<()> {
    debug!("registering a {} account", args.role);
    submit_form(
        &args.globals,
        &RegistrationForm::new(args.role),
        args.input,
        "Créer mon compte",
    )
    .await
}
