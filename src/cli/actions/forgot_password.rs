use super::submit::submit_form;
use crate::{
    cli::globals::GlobalArgs,
    mediconnect::{FormDraft, forms::PasswordResetForm},
};
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub input: FormDraft,
}

/// # Errors
/// Returns an error if the email is invalid or the reset request fails.
pub async fn execute(args: Args) -> Result<()> {
    submit_form(
        &args.globals,
        &PasswordResetForm::new(),
        args.input,
        "Mot de passe oublié ?",
    )
    .await
}
