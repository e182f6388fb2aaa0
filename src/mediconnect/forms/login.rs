//! Login form with the remember-me email.

use super::Form;
use crate::mediconnect::{
    backend::{Backend, BackendError, Credentials},
    draft::FormDraft,
    fields::{FieldKind, FieldRule, FieldValidator},
    storage::{KeyValueStore, REMEMBERED_EMAIL_KEY, load_json, remove_key, save_json},
    view::Redirect,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

pub const FORM_ID: &str = "loginForm";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const REMEMBER_ME: &str = "rememberMe";

pub const DASHBOARD_URL: &str = "dashboard.html";
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

pub struct LoginForm {
    validator: FieldValidator,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            validator: FieldValidator::new(vec![
                FieldRule::required(EMAIL, FieldKind::Email, "Veuillez saisir un email valide."),
                FieldRule::required(PASSWORD, FieldKind::Secret, "Le mot de passe est requis."),
            ]),
        }
    }
}

#[async_trait]
impl Form for LoginForm {
    fn id(&self) -> &'static str {
        FORM_ID
    }

    fn validator(&self) -> &FieldValidator {
        &self.validator
    }

    fn failure_message(&self) -> &'static str {
        "Email ou mot de passe incorrect. Veuillez réessayer."
    }

    fn redirect(&self) -> Option<Redirect> {
        Some(Redirect {
            target: DASHBOARD_URL,
            delay: REDIRECT_DELAY,
        })
    }

    fn resets_on_success(&self) -> bool {
        false
    }

    fn secret_fields(&self) -> Vec<&'static str> {
        vec![PASSWORD]
    }

    fn prefill(&self, store: &dyn KeyValueStore, draft: &mut FormDraft) {
        if !draft.trimmed(EMAIL).is_empty() {
            return;
        }
        if let Some(email) = load_json::<String>(store, REMEMBERED_EMAIL_KEY) {
            draft.set(EMAIL, email);
            draft.set(REMEMBER_ME, true);
        }
    }

    fn on_success(&self, draft: &FormDraft, store: &dyn KeyValueStore) {
        if draft.flag(REMEMBER_ME) {
            save_json(store, REMEMBERED_EMAIL_KEY, draft.trimmed(EMAIL));
        } else {
            remove_key(store, REMEMBERED_EMAIL_KEY);
        }
    }

    async fn submit(
        &self,
        backend: &dyn Backend,
        draft: &FormDraft,
    ) -> Result<String, BackendError> {
        let credentials = Credentials::new(draft.trimmed(EMAIL), draft.text(PASSWORD));
        let session = backend.sign_in(&credentials).await?;
        debug!("login accepted for user {:?}", session.user_id());

        Ok("Connexion réussie ! Redirection en cours...".to_string())
    }
}
