//! # MediConnect CI (forms & hosted auth)
//!
//! `mediconnect` carries the form logic of the MediConnect CI site: login,
//! password reset, patient/doctor registration and the contact form. Every form
//! goes through the same submission flow:
//!
//! 1. **Validate:** every field rule is checked and every failure is reported
//!    next to its field. Nothing is sent while a single rule fails.
//! 2. **Submit:** the submit control is disabled with a busy label and the form's
//!    action runs against the hosted backend (Supabase auth + tables).
//! 3. **Report:** the control is restored, then a success or a generic error banner
//!    is shown. On success the recovery draft is cleared and the page may redirect.
//!
//! ## Persistence
//!
//! Account creation, credential checks and row storage are delegated to the hosted
//! service. The only local state is best-effort key-value storage for recovery
//! drafts and the remembered login email. Password fields are never persisted.
//!
//! ## Registration contract
//!
//! Sign-up is followed by a client-side insert of the profile row into the
//! role-specific table (`patients` or `doctors`). No server-side trigger is assumed.

pub mod cli;
pub mod mediconnect;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
