pub mod contact;
pub mod forgot_password;
pub mod login;
pub mod register;
pub mod whatsapp;

// Internal "interpreter" for `Action`.
mod run;
mod submit;

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
    ForgotPassword(forgot_password::Args),
    Register(register::Args),
    Contact(contact::Args),
    Whatsapp(whatsapp::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
