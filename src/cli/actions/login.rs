use super::submit::submit_form;
use crate::{
    cli::globals::GlobalArgs,
    mediconnect::{FormDraft, forms::LoginForm},
};
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub input: FormDraft,
}

/// # Errors
/// Returns an error if the form is invalid or the credentials are rejected.
pub async fn execute(args: Args) -> Result<()> {
    submit_form(&args.globals, &LoginForm::new(), args.input, "Se connecter").await
}
