//! Form drafts: field name to value maps built from the current inputs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Unsubmitted values of one form, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDraft {
    pub form: String,
    pub fields: BTreeMap<String, FieldValue>,
}

impl FormDraft {
    #[must_use]
    pub fn new(form: &str) -> Self {
        Self {
            form: form.to_string(),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.fields.insert(field.to_string(), value.into());
    }

    /// Raw text of a field. Flags and missing fields read as empty.
    #[must_use]
    pub fn text(&self, field: &str) -> &str {
        match self.fields.get(field) {
            Some(FieldValue::Text(value)) => value,
            _ => "",
        }
    }

    /// Trimmed text of a field.
    #[must_use]
    pub fn trimmed(&self, field: &str) -> &str {
        self.text(field).trim()
    }

    /// Checkbox state. Missing fields read as unchecked.
    #[must_use]
    pub fn flag(&self, field: &str) -> bool {
        matches!(self.fields.get(field), Some(FieldValue::Flag(true)))
    }

    /// Fills fields missing from `self` with the values of `saved`.
    pub fn fill_from(&mut self, saved: &FormDraft) {
        for (field, value) in &saved.fields {
            self.fields
                .entry(field.clone())
                .or_insert_with(|| value.clone());
        }
    }

    /// Copy of the draft without the given fields, used before persisting.
    #[must_use]
    pub fn without(&self, excluded: &[&str]) -> Self {
        Self {
            form: self.form.clone(),
            fields: self
                .fields
                .iter()
                .filter(|(field, _)| !excluded.contains(&field.as_str()))
                .map(|(field, value)| (field.clone(), value.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_default_to_empty() {
        let draft = FormDraft::new("loginForm")
            .with("email", "  awa@clinique.ci ")
            .with("rememberMe", true);

        assert_eq!(draft.text("email"), "  awa@clinique.ci ");
        assert_eq!(draft.trimmed("email"), "awa@clinique.ci");
        assert!(draft.flag("rememberMe"));
        assert_eq!(draft.text("missing"), "");
        assert_eq!(draft.text("rememberMe"), "");
        assert!(!draft.flag("email"));
        assert!(!draft.flag("missing"));
    }

    #[test]
    fn without_drops_excluded_fields() {
        let draft = FormDraft::new("patientForm")
            .with("patientEmail", "awa@clinique.ci")
            .with("patientPassword", "secret-pass");

        let safe = draft.without(&["patientPassword"]);
        assert_eq!(safe.form, "patientForm");
        assert!(safe.fields.contains_key("patientEmail"));
        assert!(!safe.fields.contains_key("patientPassword"));
    }

    #[test]
    fn fill_from_keeps_current_values() {
        let saved = FormDraft::new("contactForm")
            .with("firstName", "Awa")
            .with("message", "Ancien message");
        let mut current = FormDraft::new("contactForm").with("message", "Nouveau message");

        current.fill_from(&saved);

        assert_eq!(current.text("firstName"), "Awa");
        assert_eq!(current.text("message"), "Nouveau message");
    }

    #[test]
    fn serializes_untagged() -> Result<(), serde_json::Error> {
        let draft = FormDraft::new("contactForm")
            .with("privacy", true)
            .with("subject", "billing");
        let json = serde_json::to_value(&draft)?;

        assert_eq!(
            json,
            serde_json::json!({
                "form": "contactForm",
                "fields": { "privacy": true, "subject": "billing" }
            })
        );

        let back: FormDraft = serde_json::from_value(json)?;
        assert_eq!(back, draft);
        Ok(())
    }
}
