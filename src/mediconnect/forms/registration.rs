//! Patient and doctor registration.
//!
//! Both tabs share the same flow. Sign-up creates the account, then the profile
//! row `{id, full_name}` is inserted into the role's table as the new user.

use super::Form;
use crate::mediconnect::{
    backend::{Backend, BackendError, Credentials},
    draft::FormDraft,
    fields::{FieldKind, FieldRule, FieldValidator},
    validation::format_phone_number,
    view::Redirect,
};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::{fmt, str::FromStr, time::Duration};
use tracing::info;

pub const SPECIALTY: &str = "specialty";
pub const ORDER_NUMBER: &str = "orderNumber";

pub const LOGIN_URL: &str = "login.html";
pub const REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Input ids of one registration tab; patient and doctor fields carry a prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleFields {
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub password: &'static str,
    pub terms: &'static str,
}

const PATIENT_FIELDS: RoleFields = RoleFields {
    first_name: "patientFirstName",
    last_name: "patientLastName",
    email: "patientEmail",
    phone: "patientPhone",
    password: "patientPassword",
    terms: "patientTerms",
};

const DOCTOR_FIELDS: RoleFields = RoleFields {
    first_name: "doctorFirstName",
    last_name: "doctorLastName",
    email: "doctorEmail",
    phone: "doctorPhone",
    password: "doctorPassword",
    terms: "doctorTerms",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    #[must_use]
    pub const fn form_id(self) -> &'static str {
        match self {
            Self::Patient => "patientForm",
            Self::Doctor => "doctorForm",
        }
    }

    /// Table holding the profile rows of this role.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Patient => "patients",
            Self::Doctor => "doctors",
        }
    }

    #[must_use]
    pub const fn fields(self) -> RoleFields {
        match self {
            Self::Patient => PATIENT_FIELDS,
            Self::Doctor => DOCTOR_FIELDS,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "médecin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patient => write!(formatter, "patient"),
            Self::Doctor => write!(formatter, "doctor"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "patient" => Ok(Self::Patient),
            "doctor" | "medecin" | "médecin" => Ok(Self::Doctor),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

pub struct RegistrationForm {
    role: Role,
    validator: FieldValidator,
}

impl RegistrationForm {
    #[must_use]
    pub fn new(role: Role) -> Self {
        let fields = role.fields();
        let mut rules = vec![
            FieldRule::required(
                fields.first_name,
                FieldKind::MinLength(2),
                "Le prénom doit contenir au moins 2 caractères.",
            ),
            FieldRule::required(
                fields.last_name,
                FieldKind::MinLength(2),
                "Le nom doit contenir au moins 2 caractères.",
            ),
            FieldRule::required(
                fields.email,
                FieldKind::Email,
                "Veuillez saisir un email valide.",
            ),
            FieldRule::required(
                fields.phone,
                FieldKind::Phone,
                "Veuillez saisir un numéro de téléphone valide.",
            ),
            FieldRule::required(
                fields.password,
                FieldKind::Password,
                "Le mot de passe doit contenir au moins 8 caractères.",
            ),
        ];

        if role == Role::Doctor {
            rules.push(FieldRule::required(
                SPECIALTY,
                FieldKind::Choice,
                "Veuillez choisir une spécialité.",
            ));
            rules.push(FieldRule::required(
                ORDER_NUMBER,
                FieldKind::MinLength(5),
                "Veuillez saisir un numéro d'ordre valide.",
            ));
        }

        rules.push(FieldRule::required(
            fields.terms,
            FieldKind::Accepted,
            "Vous devez accepter les conditions d'utilisation.",
        ));

        Self {
            role,
            validator: FieldValidator::new(rules),
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Metadata attached to the account at sign-up.
    fn metadata(&self, draft: &FormDraft) -> Value {
        let fields = self.role.fields();
        let mut metadata = Map::new();
        metadata.insert("role".to_string(), json!(self.role.to_string()));
        metadata.insert("first_name".to_string(), json!(draft.trimmed(fields.first_name)));
        metadata.insert("last_name".to_string(), json!(draft.trimmed(fields.last_name)));
        metadata.insert(
            "phone".to_string(),
            json!(format_phone_number(draft.trimmed(fields.phone))),
        );

        if self.role == Role::Doctor {
            metadata.insert("specialty".to_string(), json!(draft.trimmed(SPECIALTY)));
            metadata.insert("order_number".to_string(), json!(draft.trimmed(ORDER_NUMBER)));
        }
        Value::Object(metadata)
    }

    fn full_name(&self, draft: &FormDraft) -> String {
        let fields = self.role.fields();
        format!(
            "{} {}",
            draft.trimmed(fields.first_name),
            draft.trimmed(fields.last_name)
        )
    }
}

#[async_trait]
impl Form for RegistrationForm {
    fn id(&self) -> &'static str {
        self.role.form_id()
    }

    fn validator(&self) -> &FieldValidator {
        &self.validator
    }

    fn failure_message(&self) -> &'static str {
        "Une erreur est survenue lors de la création du compte. Veuillez réessayer."
    }

    fn busy_label(&self) -> &'static str {
        "Création du compte..."
    }

    fn redirect(&self) -> Option<Redirect> {
        Some(Redirect {
            target: LOGIN_URL,
            delay: REDIRECT_DELAY,
        })
    }

    fn secret_fields(&self) -> Vec<&'static str> {
        vec![self.role.fields().password]
    }

    async fn submit(
        &self,
        backend: &dyn Backend,
        draft: &FormDraft,
    ) -> Result<String, BackendError> {
        let fields = self.role.fields();
        let credentials = Credentials::new(draft.trimmed(fields.email), draft.text(fields.password));

        let session = backend
            .sign_up(&credentials, Some(self.metadata(draft)))
            .await?;
        let user_id = session
            .user_id()
            .ok_or_else(|| BackendError::Parse("sign-up response has no user id".to_string()))?;

        let profile = json!({
            "id": user_id.to_string(),
            "full_name": self.full_name(draft),
        });
        backend
            .insert(self.role.table(), &profile, Some(&session))
            .await?;
        info!("{} account created: {}", self.role, user_id);

        Ok(format!(
            "Compte {} créé avec succès ! Vérifiez votre email pour l'activation.",
            self.role.label()
        ))
    }
}
