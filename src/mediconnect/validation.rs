//! Format checks shared by every form. All checks are pure: malformed input
//! yields `false`, never an error.

use regex::Regex;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Country code prepended by [`format_phone_number`].
pub const COUNTRY_CODE: &str = "225";

/// Plausible email: a single `@` followed by a dotted domain, no whitespace.
pub fn validate_email(email: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").is_ok_and(|regex| regex.is_match(email))
}

/// Plausible Ivorian number: optional `+225`/`225` prefix, then 8 to 10 digits.
/// Whitespace is ignored so formatted numbers validate.
pub fn validate_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    Regex::new(r"^(\+225|225)?[0-9]{8,10}$").is_ok_and(|regex| regex.is_match(&compact))
}

pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Formats raw phone input as `+225 XX XX XX XX XX`.
///
/// Non-digits are dropped and the country code is added when missing. Digits past
/// the fifth pair are discarded, as the input field does.
pub fn format_phone_number(input: &str) -> String {
    let mut digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }
    if !digits.starts_with(COUNTRY_CODE) {
        digits.insert_str(0, COUNTRY_CODE);
    }

    let local = &digits[COUNTRY_CODE.len()..];
    let mut formatted = format!("+{COUNTRY_CODE}");
    for pair in local.as_bytes().chunks(2).take(5) {
        formatted.push(' ');
        formatted.push_str(&String::from_utf8_lossy(pair));
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_email_accepts_basic_format() {
        assert!(validate_email("a@example.com"));
        assert!(validate_email("awa.kone@clinique.ci"));
        assert!(validate_email("local@domain.tld"));
    }

    #[test]
    fn validate_email_rejects_missing_parts() {
        assert!(!validate_email(""));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("missing-at.example.com"));
        assert!(!validate_email("missing-domain@"));
        assert!(!validate_email("no-dot@domain"));
        assert!(!validate_email("two@@example.com"));
        assert!(!validate_email("space in@example.com"));
    }

    #[test]
    fn validate_email_without_at_is_always_false() {
        for candidate in ["example.com", "a.b.c", "plain", "   ", "user(at)mail.ci"] {
            assert!(!validate_email(candidate), "{candidate}");
        }
    }

    #[test]
    fn validate_phone_accepts_local_and_prefixed_numbers() {
        assert!(validate_phone("07123456"));
        assert!(validate_phone("0712345678"));
        assert!(validate_phone("2250712345678"));
        assert!(validate_phone("+2250712345678"));
        assert!(validate_phone("+225 07 12 34 56 78"));
    }

    #[test]
    fn validate_phone_rejects_bad_lengths_and_letters() {
        assert!(!validate_phone(""));
        assert!(!validate_phone("0712345"));
        assert!(!validate_phone("071234567890"));
        assert!(!validate_phone("07-12-34-56"));
        assert!(!validate_phone("+33612345678a"));
    }

    #[test]
    fn validate_password_enforces_minimum_length() {
        assert!(!validate_password(""));
        assert!(!validate_password("1234567"));
        assert!(validate_password("12345678"));
        assert!(validate_password("a much longer passphrase"));
        // counted in characters, not bytes
        assert!(!validate_password("éééé"));
    }

    #[test]
    fn format_phone_number_adds_country_code() {
        assert_eq!(format_phone_number("0712345678"), "+225 07 12 34 56 78");
        assert_eq!(format_phone_number("225 0712345678"), "+225 07 12 34 56 78");
        assert_eq!(format_phone_number("+225-07-12"), "+225 07 12");
    }

    #[test]
    fn format_phone_number_handles_empty_and_overflow() {
        assert_eq!(format_phone_number(""), "");
        assert_eq!(format_phone_number("abc"), "");
        assert_eq!(format_phone_number("071234567899"), "+225 07 12 34 56 78");
    }

    #[test]
    fn formatted_numbers_still_validate() {
        assert!(validate_phone(&format_phone_number("0712345678")));
    }
}
