//! Credential validation
//!
//! Pure predicates for signup input. Nothing here touches the store.

use std::sync::OnceLock;

use regex::Regex;

use super::DomainError;

/// Symbols a password must draw at least one character from
pub const PASSWORD_SYMBOLS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Column width of `first_name` and `last_name`
pub const MAX_NAME_LEN: usize = 100;

/// Column width of `email`, entry titles and category names
pub const MAX_TEXT_LEN: usize = 255;

/// Reject `value` when it has more than `max` characters.
pub fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::FieldTooLong(field, max));
    }
    Ok(())
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$")
            .expect("Invalid email pattern constant")
    })
}

/// Lowercase and trim an email so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// True iff `email` has a `local@domain.tld` shape.
pub fn validate_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// True iff `password` is at least 8 characters long, mixes lowercase,
/// uppercase, digits and one of `@$!%*?&`, and uses nothing else.
pub fn validate_password(password: &str) -> bool {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return false;
    }

    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(&c));

    allowed
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_common_shapes() {
        assert!(validate_email("jane.doe@x.com"));
        assert!(validate_email("first+tag@mail-host.co.uk"));
        assert!(validate_email("a_b-c@d.e"));
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        assert!(!validate_email(""));
        assert!(!validate_email("no-at-sign.com"));
        assert!(!validate_email("user@nodot"));
        assert!(!validate_email("@x.com"));
        assert!(!validate_email("user@.com"));
        assert!(!validate_email("us er@x.com"));
        assert!(!validate_email("user@x.com "));
    }

    #[test]
    fn test_check_length_counts_characters() {
        assert_eq!(check_length("title", &"a".repeat(255), MAX_TEXT_LEN), Ok(()));
        assert_eq!(
            check_length("title", &"a".repeat(256), MAX_TEXT_LEN),
            Err(DomainError::FieldTooLong("title", MAX_TEXT_LEN))
        );
        // Multi-byte characters count once
        assert_eq!(check_length("firstName", &"é".repeat(100), MAX_NAME_LEN), Ok(()));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane.Doe@X.com "), "jane.doe@x.com");
    }

    #[test]
    fn test_validate_password_accepts_complex() {
        assert!(validate_password("Abcd1234!"));
        assert!(validate_password("zZ9@zZ9@"));
    }

    #[test]
    fn test_validate_password_rejects_each_missing_class() {
        assert!(!validate_password(""));
        assert!(!validate_password("Ab1!"));
        assert!(!validate_password("abcd1234!"));
        assert!(!validate_password("ABCD1234!"));
        assert!(!validate_password("Abcdefgh!"));
        assert!(!validate_password("Abcd12345"));
    }

    #[test]
    fn test_validate_password_rejects_foreign_characters() {
        assert!(!validate_password("Abcd1234!#"));
        assert!(!validate_password("Abcd 1234!"));
        assert!(!validate_password("Äbcd1234!"));
    }
}
