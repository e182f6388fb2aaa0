//! Contact form. Messages are stored in the `contact_messages` table; the form
//! keeps a recovery draft while it is being filled.

use super::Form;
use crate::mediconnect::{
    backend::{Backend, BackendError},
    draft::FormDraft,
    fields::{FieldKind, FieldRule, FieldValidator},
    storage::CONTACT_DRAFT_KEY,
    validation::format_phone_number,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::{fmt, str::FromStr};
use tracing::info;
use ulid::Ulid;

pub const FORM_ID: &str = "contactForm";
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const SUBJECT: &str = "subject";
pub const MESSAGE: &str = "message";
pub const PRIVACY: &str = "privacy";

pub const TABLE: &str = "contact_messages";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subject {
    Support,
    Billing,
    Appointment,
    Partnership,
    Other,
}

impl Subject {
    pub const ALL: [Self; 5] = [
        Self::Support,
        Self::Billing,
        Self::Appointment,
        Self::Partnership,
        Self::Other,
    ];

    /// Value of the select option.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Support => "support",
            Self::Billing => "billing",
            Self::Appointment => "appointment",
            Self::Partnership => "partnership",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Support => "Support technique",
            Self::Billing => "Facturation",
            Self::Appointment => "Rendez-vous",
            Self::Partnership => "Partenariat",
            Self::Other => "Autre",
        }
    }

    /// Hint shown as the message placeholder once the subject is picked.
    #[must_use]
    pub const fn help_text(self) -> &'static str {
        match self {
            Self::Support => {
                "Décrivez le problème technique que vous rencontrez avec des détails précis."
            }
            Self::Billing => "Mentionnez votre numéro de facture ou la transaction concernée.",
            Self::Appointment => {
                "Précisez le type de consultation souhaité et vos disponibilités."
            }
            Self::Partnership => {
                "Présentez votre organisation et le type de partenariat envisagé."
            }
            Self::Other => "Décrivez votre demande en détail.",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.value())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|subject| subject.value().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("unknown subject: {value}"))
    }
}

pub struct ContactForm {
    validator: FieldValidator,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            validator: FieldValidator::new(vec![
                FieldRule::required(
                    FIRST_NAME,
                    FieldKind::MinLength(2),
                    "Le prénom doit contenir au moins 2 caractères.",
                ),
                FieldRule::required(
                    LAST_NAME,
                    FieldKind::MinLength(2),
                    "Le nom doit contenir au moins 2 caractères.",
                ),
                FieldRule::required(EMAIL, FieldKind::Email, "Veuillez saisir un email valide."),
                FieldRule::optional(PHONE, FieldKind::Phone, "Format de téléphone invalide."),
                FieldRule::required(SUBJECT, FieldKind::Choice, "Veuillez choisir un sujet."),
                FieldRule::required(
                    MESSAGE,
                    FieldKind::MinLength(10),
                    "Le message doit contenir au moins 10 caractères.",
                ),
                FieldRule::required(
                    PRIVACY,
                    FieldKind::Accepted,
                    "Vous devez accepter la politique de confidentialité.",
                ),
            ]),
        }
    }

    fn row(draft: &FormDraft, reference: Ulid) -> Value {
        let phone = format_phone_number(draft.trimmed(PHONE));
        json!({
            "reference": reference.to_string(),
            "first_name": draft.trimmed(FIRST_NAME),
            "last_name": draft.trimmed(LAST_NAME),
            "email": draft.trimmed(EMAIL),
            "phone": if phone.is_empty() { Value::Null } else { json!(phone) },
            "subject": draft.trimmed(SUBJECT),
            "message": draft.trimmed(MESSAGE),
        })
    }
}

#[async_trait]
impl Form for ContactForm {
    fn id(&self) -> &'static str {
        FORM_ID
    }

    fn validator(&self) -> &FieldValidator {
        &self.validator
    }

    fn failure_message(&self) -> &'static str {
        "Une erreur est survenue lors de l'envoi. Veuillez réessayer ou nous contacter directement."
    }

    fn busy_label(&self) -> &'static str {
        "Envoi en cours..."
    }

    fn draft_key(&self) -> Option<&'static str> {
        Some(CONTACT_DRAFT_KEY)
    }

    async fn submit(
        &self,
        backend: &dyn Backend,
        draft: &FormDraft,
    ) -> Result<String, BackendError> {
        let reference = Ulid::new();
        backend
            .insert(TABLE, &Self::row(draft, reference), None)
            .await?;
        info!("contact message stored: {}", reference);

        Ok(
            "Votre message a été envoyé avec succès ! Nous vous répondrons dans les plus brefs délais."
                .to_string(),
        )
    }
}
