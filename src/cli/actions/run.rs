use crate::cli::actions::{Action, contact, forgot_password, login, register, whatsapp};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => login::execute(args).await,
        Action::ForgotPassword(args) => forgot_password::execute(args).await,
        Action::Register(args) => register::execute(args).await,
        Action::Contact(args) => contact::execute(args).await,
        Action::Whatsapp(args) => whatsapp::execute(&args),
    }
}
