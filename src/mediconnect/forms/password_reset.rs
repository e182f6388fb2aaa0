//! "Mot de passe oublié" on the login page: only the email is needed.

use super::{Form, login::EMAIL};
use crate::mediconnect::{
    backend::{Backend, BackendError},
    draft::FormDraft,
    fields::{FieldKind, FieldRule, FieldValidator},
    storage::{KeyValueStore, REMEMBERED_EMAIL_KEY, load_json},
};
use async_trait::async_trait;

pub const FORM_ID: &str = "forgotPasswordForm";

pub struct PasswordResetForm {
    validator: FieldValidator,
}

impl Default for PasswordResetForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordResetForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            validator: FieldValidator::new(vec![FieldRule::required(
                EMAIL,
                FieldKind::Email,
                "Veuillez saisir votre email d'abord.",
            )]),
        }
    }
}

#[async_trait]
impl Form for PasswordResetForm {
    fn id(&self) -> &'static str {
        FORM_ID
    }

    fn validator(&self) -> &FieldValidator {
        &self.validator
    }

    fn failure_message(&self) -> &'static str {
        "Impossible d'envoyer le lien de réinitialisation. Veuillez réessayer."
    }

    fn busy_label(&self) -> &'static str {
        "Envoi en cours..."
    }

    fn resets_on_success(&self) -> bool {
        false
    }

    fn prefill(&self, store: &dyn KeyValueStore, draft: &mut FormDraft) {
        if !draft.trimmed(EMAIL).is_empty() {
            return;
        }
        if let Some(email) = load_json::<String>(store, REMEMBERED_EMAIL_KEY) {
            draft.set(EMAIL, email);
        }
    }

    async fn submit(
        &self,
        backend: &dyn Backend,
        draft: &FormDraft,
    ) -> Result<String, BackendError> {
        backend.recover(draft.trimmed(EMAIL)).await?;
        Ok("Un lien de réinitialisation a été envoyé à votre email.".to_string())
    }
}
