//! Field validators shared by the forms

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ValidationError;

/// Minimum password length accepted by every form that takes one
pub const MIN_PASSWORD_LEN: usize = 6;

/// Loose address check: something@something.tld without whitespace
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("invalid email regex")
});

/// Value must contain non-whitespace. Returns the trimmed value.
pub fn data_required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(value)
}

/// Value must look like an email address.
pub fn email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field,
            reason: "Invalid email address.",
        })
    }
}

/// Value must be at least `min` characters. Not trimmed: spaces count in passwords.
pub fn min_length(field: &'static str, value: &str, min: usize) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(())
}

/// Empty or whitespace-only input becomes `None`.
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims() {
        assert_eq!(data_required("username", "  bob ").unwrap(), "bob");
        assert!(data_required("username", "   ").is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(email("email", "test@test.com").is_ok());
        assert!(email("email", "first.last@mail.example.org").is_ok());
        assert!(email("email", "no-at-sign.com").is_err());
        assert!(email("email", "two@@test.com").is_err());
        assert!(email("email", "space in@test.com").is_err());
        assert!(email("email", "user@localhost").is_err());
    }

    #[test]
    fn min_length_counts_chars() {
        assert!(min_length("password", "abcdef", 6).is_ok());
        assert!(min_length("password", "abcde", 6).is_err());
        assert!(min_length("password", "", 6).is_err());
    }

    #[test]
    fn optional_blank_is_none() {
        assert_eq!(optional(""), None);
        assert_eq!(optional("  "), None);
        assert_eq!(optional(" x "), Some("x".to_owned()));
    }
}
