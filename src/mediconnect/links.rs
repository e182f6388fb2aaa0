//! Outbound WhatsApp deep links.

use url::Url;

pub const WHATSAPP_BASE: &str = "https://wa.me/";

pub const DEFAULT_GREETING: &str =
    "Bonjour, j'aimerais avoir des informations sur MediConnect CI.";

/// Builds `https://wa.me/{phone}?text=...`. An empty message falls back to the
/// default greeting.
/// # Errors
/// Returns an error if the phone number does not form a valid URL path.
pub fn whatsapp_link(phone: &str, message: &str) -> Result<Url, url::ParseError> {
    let text = if message.trim().is_empty() {
        DEFAULT_GREETING
    } else {
        message
    };
    let phone: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '+')
        .collect();

    Url::parse_with_params(&format!("{WHATSAPP_BASE}{phone}"), &[("text", text)])
}

/// Message pre-filled from the contact form.
#[must_use]
pub fn contact_message(subject_label: &str, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return DEFAULT_GREETING.to_string();
    }
    format!("Sujet: {}\n\n{body}", subject_label.trim())
}
