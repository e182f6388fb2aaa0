//! The page side of a form: field feedback, the submit control, banners and
//! navigation. The controller only talks to a [`FormView`], so the same flow
//! drives the terminal front end and the recording view used in tests.

use std::time::Duration;

/// Banners hide themselves after this delay.
pub const ALERT_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Label shown on a submit control while a request is in flight, unless the
/// form provides its own.
pub const DEFAULT_BUSY_LABEL: &str = "Chargement...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// A dismissible banner shown above the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub dismiss_after: Duration,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
            dismiss_after: ALERT_DISMISS_AFTER,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
            dismiss_after: ALERT_DISMISS_AFTER,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub target: &'static str,
    pub delay: Duration,
}

/// State of a submit control. The original label is kept while busy so it can
/// be put back once the request settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
    pub label: String,
    original_label: Option<String>,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            enabled: true,
            label: label.into(),
            original_label: None,
        }
    }

    pub fn set_busy(&mut self, busy_label: &str) {
        if self.original_label.is_none() {
            self.original_label = Some(std::mem::replace(
                &mut self.label,
                busy_label.to_string(),
            ));
        } else {
            self.label = busy_label.to_string();
        }
        self.enabled = false;
    }

    pub fn restore(&mut self) {
        if let Some(original) = self.original_label.take() {
            self.label = original;
        }
        self.enabled = true;
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.enabled
    }
}

pub trait FormView: Send {
    /// Removes every field error and validity marker.
    fn clear_errors(&mut self);

    fn show_field_error(&mut self, field: &str, message: &str);

    fn mark_field_valid(&mut self, field: &str);

    /// Disables the submit control and swaps its label.
    fn set_busy(&mut self, label: &str);

    /// Re-enables the submit control with its original label.
    fn restore_submit(&mut self);

    fn show_alert(&mut self, alert: Alert);

    /// Empties every input of the form.
    fn reset(&mut self);

    fn navigate(&mut self, redirect: &Redirect);
}

/// Renders form feedback on the terminal.
#[derive(Debug)]
pub struct TerminalView {
    button: SubmitButton,
}

impl TerminalView {
    pub fn new(submit_label: impl Into<String>) -> Self {
        Self {
            button: SubmitButton::new(submit_label),
        }
    }

    #[must_use]
    pub fn button(&self) -> &SubmitButton {
        &self.button
    }
}

impl FormView for TerminalView {
    fn clear_errors(&mut self) {}

    fn show_field_error(&mut self, field: &str, message: &str) {
        eprintln!("  ✗ {field}: {message}");
    }

    fn mark_field_valid(&mut self, field: &str) {
        tracing::debug!("{field} is valid");
    }

    fn set_busy(&mut self, label: &str) {
        self.button.set_busy(label);
        println!("{label}");
    }

    fn restore_submit(&mut self) {
        self.button.restore();
    }

    fn show_alert(&mut self, alert: Alert) {
        match alert.kind {
            AlertKind::Success => println!("{}", alert.message),
            AlertKind::Error => eprintln!("{}", alert.message),
        }
    }

    fn reset(&mut self) {}

    fn navigate(&mut self, redirect: &Redirect) {
        println!(
            "Redirection vers {} dans {}s",
            redirect.target,
            redirect.delay.as_secs()
        );
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    ClearErrors,
    FieldError { field: String, message: String },
    FieldValid(String),
    Busy(String),
    Restored,
    Alert(Alert),
    Reset,
    Navigate(Redirect),
}

/// Records every call so tests can assert on the rendered flow.
#[derive(Debug)]
pub struct RecordingView {
    pub button: SubmitButton,
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn new(submit_label: impl Into<String>) -> Self {
        Self {
            button: SubmitButton::new(submit_label),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn alerts(&self) -> Vec<&Alert> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Alert(alert) => Some(alert),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn field_errors(&self) -> Vec<(&str, &str)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::FieldError { field, message } => {
                    Some((field.as_str(), message.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn redirect(&self) -> Option<&Redirect> {
        self.events.iter().find_map(|event| match event {
            ViewEvent::Navigate(redirect) => Some(redirect),
            _ => None,
        })
    }
}

impl FormView for RecordingView {
    fn clear_errors(&mut self) {
        self.events.push(ViewEvent::ClearErrors);
    }

    fn show_field_error(&mut self, field: &str, message: &str) {
        self.events.push(ViewEvent::FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    fn mark_field_valid(&mut self, field: &str) {
        self.events.push(ViewEvent::FieldValid(field.to_string()));
    }

    fn set_busy(&mut self, label: &str) {
        self.button.set_busy(label);
        self.events.push(ViewEvent::Busy(label.to_string()));
    }

    fn restore_submit(&mut self) {
        self.button.restore();
        self.events.push(ViewEvent::Restored);
    }

    fn show_alert(&mut self, alert: Alert) {
        self.events.push(ViewEvent::Alert(alert));
    }

    fn reset(&mut self) {
        self.events.push(ViewEvent::Reset);
    }

    fn navigate(&mut self, redirect: &Redirect) {
        self.events.push(ViewEvent::Navigate(redirect.clone()));
    }
}
