//! Submission flow shared by every form.
//!
//! ```text
//! Idle -> Validating -> Idle                       (invalid, field errors shown)
//!                    -> Submitting -> Succeeded -> Idle
//!                                  -> Failed    -> Idle
//! ```
//!
//! Only one submission runs per controller. A submit arriving while another is
//! in flight is ignored and touches neither the view nor the backend.

use super::{
    backend::Backend,
    draft::FormDraft,
    fields::{FieldResult, ValidationReport},
    forms::Form,
    storage::{KeyValueStore, load_json, remove_key, save_json},
    view::{Alert, FormView},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, instrument};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// At least one field failed; nothing was sent.
    Invalid(ValidationReport),
    Submitted,
    Failed,
    /// Another submission was already in flight.
    Ignored,
}

pub struct FormController {
    backend: Arc<dyn Backend>,
    store: Arc<dyn KeyValueStore>,
    state: Mutex<SubmissionState>,
}

/// Puts the controller back to `Idle` when the submission ends, however it ends.
struct InFlight<'a> {
    state: &'a Mutex<SubmissionState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *lock(self.state) = SubmissionState::Idle;
    }
}

/// Keeps the submit control busy while alive and restores it on drop, so a
/// panicking or cancelled backend call still re-enables the control.
struct BusyControl<'a, V: FormView + ?Sized> {
    view: &'a mut V,
}

impl<'a, V: FormView + ?Sized> BusyControl<'a, V> {
    fn engage(view: &'a mut V, label: &str) -> Self {
        view.set_busy(label);
        Self { view }
    }
}

impl<V: FormView + ?Sized> Drop for BusyControl<'_, V> {
    fn drop(&mut self) {
        self.view.restore_submit();
    }
}

fn lock(state: &Mutex<SubmissionState>) -> MutexGuard<'_, SubmissionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FormController {
    pub fn new(backend: Arc<dyn Backend>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            store,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        *lock(&self.state)
    }

    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        let mut state = lock(&self.state);
        if *state != SubmissionState::Idle {
            return None;
        }
        *state = SubmissionState::Validating;
        Some(InFlight { state: &self.state })
    }

    fn transition(&self, next: SubmissionState) {
        *lock(&self.state) = next;
    }

    /// Validates the draft, then runs the form's backend action.
    #[instrument(skip_all, fields(form = form.id()))]
    pub async fn submit(
        &self,
        form: &dyn Form,
        draft: &FormDraft,
        view: &mut dyn FormView,
    ) -> Outcome {
        let Some(_in_flight) = self.begin() else {
            debug!("submission already in flight, ignoring");
            return Outcome::Ignored;
        };

        view.clear_errors();
        let report = form.validator().validate(draft);
        render(view, &report.results);
        if !report.is_valid() {
            debug!("{} invalid field(s)", report.errors().count());
            return Outcome::Invalid(report);
        }

        self.transition(SubmissionState::Submitting);
        let result = {
            let _busy = BusyControl::engage(&mut *view, form.busy_label());
            form.submit(self.backend.as_ref(), draft).await
        };

        match result {
            Ok(message) => {
                self.transition(SubmissionState::Succeeded);
                view.show_alert(Alert::success(message));
                if form.resets_on_success() {
                    view.reset();
                }
                if let Some(key) = form.draft_key() {
                    remove_key(self.store.as_ref(), key);
                }
                form.on_success(draft, self.store.as_ref());
                if let Some(redirect) = form.redirect() {
                    view.navigate(&redirect);
                }
                info!("submission succeeded");
                Outcome::Submitted
            }
            Err(err) => {
                self.transition(SubmissionState::Failed);
                error!("Erreur lors de l'envoi du formulaire: {err}");
                view.show_alert(Alert::error(form.failure_message()));
                Outcome::Failed
            }
        }
    }

    /// Checks one field, as when an input loses focus. Returns `None` if the
    /// form has no rule for the field.
    pub fn check_field(
        &self,
        form: &dyn Form,
        draft: &FormDraft,
        field: &str,
        view: &mut dyn FormView,
    ) -> Option<FieldResult> {
        let result = form.validator().rule(field)?.check(draft);
        render(view, std::slice::from_ref(&result));
        Some(result)
    }

    /// Values to prefill when the form is loaded: the saved recovery draft and
    /// form-specific stored values.
    #[must_use]
    pub fn restore(&self, form: &dyn Form) -> Option<FormDraft> {
        let mut draft = FormDraft::new(form.id());
        if let Some(saved) = form
            .draft_key()
            .and_then(|key| load_json::<FormDraft>(self.store.as_ref(), key))
        {
            draft.fill_from(&saved.without(&form.secret_fields()));
        }
        form.prefill(self.store.as_ref(), &mut draft);

        if draft.fields.is_empty() {
            None
        } else {
            debug!("restored {} field(s) for {}", draft.fields.len(), form.id());
            Some(draft)
        }
    }

    /// Saves the recovery draft without its secret fields. Best effort.
    pub fn autosave(&self, form: &dyn Form, draft: &FormDraft) -> bool {
        form.draft_key().is_some_and(|key| {
            save_json(
                self.store.as_ref(),
                key,
                &draft.without(&form.secret_fields()),
            )
        })
    }
}

fn render(view: &mut dyn FormView, results: &[FieldResult]) {
    for result in results {
        match result.message {
            Some(message) => view.show_field_error(result.field, message),
            None => view.mark_field_valid(result.field),
        }
    }
}
