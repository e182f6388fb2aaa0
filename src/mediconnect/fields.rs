//! Field rules and the validator shared by every form.
//!
//! A form declares its rules once; [`FieldValidator::validate`] checks every
//! rule against a draft and reports all failures, so the view can mark each
//! invalid field at once instead of stopping at the first one.

use super::{
    draft::FormDraft,
    validation::{validate_email, validate_password, validate_phone},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; only the required check applies.
    Text,
    Email,
    Phone,
    Password,
    /// A password checked as typed; any non-empty value passes.
    Secret,
    /// Trimmed text of at least `n` characters.
    MinLength(usize),
    /// A select input; any non-empty value is a valid choice.
    Choice,
    /// A checkbox that must be ticked.
    Accepted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    pub message: &'static str,
}

impl FieldRule {
    #[must_use]
    pub const fn required(field: &'static str, kind: FieldKind, message: &'static str) -> Self {
        Self {
            field,
            required: true,
            kind,
            message,
        }
    }

    #[must_use]
    pub const fn optional(field: &'static str, kind: FieldKind, message: &'static str) -> Self {
        Self {
            field,
            required: false,
            kind,
            message,
        }
    }

    /// Checks a single field, as done when an input loses focus.
    #[must_use]
    pub fn check(&self, draft: &FormDraft) -> FieldResult {
        if self.passes(draft) {
            FieldResult::valid(self.field)
        } else {
            FieldResult::invalid(self.field, self.message)
        }
    }

    fn passes(&self, draft: &FormDraft) -> bool {
        if self.kind == FieldKind::Accepted {
            return draft.flag(self.field) || !self.required;
        }

        // passwords are checked as typed, everything else trimmed
        let value = if matches!(self.kind, FieldKind::Password | FieldKind::Secret) {
            draft.text(self.field)
        } else {
            draft.trimmed(self.field)
        };

        if value.is_empty() {
            return !self.required;
        }

        match self.kind {
            FieldKind::Text | FieldKind::Secret | FieldKind::Choice | FieldKind::Accepted => true,
            FieldKind::Email => validate_email(value),
            FieldKind::Phone => validate_phone(value),
            FieldKind::Password => validate_password(value),
            FieldKind::MinLength(min) => value.chars().count() >= min,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldResult {
    pub field: &'static str,
    pub valid: bool,
    pub message: Option<&'static str>,
}

impl FieldResult {
    fn valid(field: &'static str) -> Self {
        Self {
            field,
            valid: true,
            message: None,
        }
    }

    fn invalid(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            valid: false,
            message: Some(message),
        }
    }
}

/// Outcome of a full validation pass, one result per rule in rule order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub results: Vec<FieldResult>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|result| result.valid)
    }

    pub fn errors(&self) -> impl Iterator<Item = &FieldResult> {
        self.results.iter().filter(|result| !result.valid)
    }

    #[must_use]
    pub fn error_for(&self, field: &str) -> Option<&'static str> {
        self.errors()
            .find(|result| result.field == field)
            .and_then(|result| result.message)
    }
}

#[derive(Clone, Debug, Default)]
pub struct FieldValidator {
    rules: Vec<FieldRule>,
}

impl FieldValidator {
    #[must_use]
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    #[must_use]
    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }

    #[must_use]
    pub fn validate(&self, draft: &FormDraft) -> ValidationReport {
        ValidationReport {
            results: self.rules.iter().map(|rule| rule.check(draft)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> FieldValidator {
        FieldValidator::new(vec![
            FieldRule::required("firstName", FieldKind::MinLength(2), "Prénom trop court."),
            FieldRule::required("email", FieldKind::Email, "Email invalide."),
            FieldRule::optional("phone", FieldKind::Phone, "Téléphone invalide."),
            FieldRule::required("password", FieldKind::Password, "Mot de passe trop court."),
            FieldRule::required("subject", FieldKind::Choice, "Choisissez un sujet."),
            FieldRule::required("terms", FieldKind::Accepted, "Acceptez les conditions."),
        ])
    }

    fn complete() -> FormDraft {
        FormDraft::new("form")
            .with("firstName", "Awa")
            .with("email", "awa@clinique.ci")
            .with("password", "motdepasse")
            .with("subject", "support")
            .with("terms", true)
    }

    #[test]
    fn complete_draft_is_valid() {
        let report = validator().validate(&complete());
        assert!(report.is_valid());
        assert_eq!(report.results.len(), 6);
        assert_eq!(report.errors().count(), 0);
    }

    #[test]
    fn every_failing_field_is_reported() {
        let draft = FormDraft::new("form")
            .with("firstName", " A ")
            .with("email", "awa")
            .with("phone", "12")
            .with("password", "court");

        let report = validator().validate(&draft);

        assert!(!report.is_valid());
        let failed: Vec<_> = report.errors().map(|result| result.field).collect();
        assert_eq!(
            failed,
            vec!["firstName", "email", "phone", "password", "subject", "terms"]
        );
        assert_eq!(report.error_for("email"), Some("Email invalide."));
        assert_eq!(report.error_for("terms"), Some("Acceptez les conditions."));
    }

    #[test]
    fn missing_required_field_fails_with_rule_message() {
        let mut draft = complete();
        draft.fields.remove("email");

        let report = validator().validate(&draft);
        assert_eq!(report.error_for("email"), Some("Email invalide."));
        assert_eq!(report.errors().count(), 1);
    }

    #[test]
    fn empty_optional_field_is_valid() {
        let draft = complete().with("phone", "   ");
        assert!(validator().validate(&draft).is_valid());
    }

    #[test]
    fn password_is_not_trimmed() {
        let draft = complete().with("password", "   abc   ");
        assert!(validator().validate(&draft).is_valid());

        let draft = complete().with("password", "  abc  ");
        assert_eq!(
            validator().validate(&draft).error_for("password"),
            Some("Mot de passe trop court.")
        );
    }

    #[test]
    fn secret_accepts_any_typed_value() {
        let rule = FieldRule::required("password", FieldKind::Secret, "Requis.");

        assert!(rule.check(&FormDraft::new("form").with("password", "   ")).valid);
        assert!(rule.check(&FormDraft::new("form").with("password", "a")).valid);
        assert_eq!(
            rule.check(&FormDraft::new("form").with("password", "")).message,
            Some("Requis.")
        );
    }

    #[test]
    fn single_rule_check() {
        let rule = FieldRule::required("message", FieldKind::MinLength(10), "Trop court.");
        let short = FormDraft::new("form").with("message", "Bonjour");
        let long = FormDraft::new("form").with("message", "Bonjour docteur");

        assert_eq!(rule.check(&short).message, Some("Trop court."));
        assert!(rule.check(&long).valid);
    }
}
