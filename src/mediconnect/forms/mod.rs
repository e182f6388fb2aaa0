//! Per-page forms. Each form only declares what differs between pages: its
//! rules, labels, backend action and success side effects. The submission flow
//! itself lives in [`crate::mediconnect::controller`].

pub mod contact;
pub mod login;
pub mod password_reset;
pub mod registration;

pub use self::contact::{ContactForm, Subject};
pub use self::login::LoginForm;
pub use self::password_reset::PasswordResetForm;
pub use self::registration::{RegistrationForm, Role};

use super::{
    backend::{Backend, BackendError},
    draft::FormDraft,
    fields::FieldValidator,
    storage::KeyValueStore,
    view::{DEFAULT_BUSY_LABEL, Redirect},
};
use async_trait::async_trait;

#[async_trait]
pub trait Form: Send + Sync {
    /// Identity of the form, also used as the draft's form name.
    fn id(&self) -> &'static str;

    fn validator(&self) -> &FieldValidator;

    /// Generic message shown when the backend call fails.
    fn failure_message(&self) -> &'static str;

    fn busy_label(&self) -> &'static str {
        DEFAULT_BUSY_LABEL
    }

    fn redirect(&self) -> Option<Redirect> {
        None
    }

    fn resets_on_success(&self) -> bool {
        true
    }

    /// Storage key of the recovery draft, if the form keeps one.
    fn draft_key(&self) -> Option<&'static str> {
        None
    }

    /// Fields that must never be written to local storage.
    fn secret_fields(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Adds stored values to a freshly loaded form.
    fn prefill(&self, _store: &dyn KeyValueStore, _draft: &mut FormDraft) {}

    /// Local side effects after a successful submission.
    fn on_success(&self, _draft: &FormDraft, _store: &dyn KeyValueStore) {}

    /// Runs the backend action and returns the success message.
    /// # Errors
    /// Returns the backend error unchanged; the controller turns it into a
    /// generic message.
    async fn submit(&self, backend: &dyn Backend, draft: &FormDraft)
    -> Result<String, BackendError>;
}
