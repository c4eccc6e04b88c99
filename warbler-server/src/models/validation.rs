//! Validation error types

use std::fmt;

/// Validation error for domain models and form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field is shorter than its minimum length
    TooShort { field: &'static str, min: usize },

    /// String doesn't match required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::TooLong { field, .. }
            | Self::TooShort { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }

    /// Message shown next to the form field, without the field name.
    pub fn message(&self) -> String {
        match self {
            Self::Empty { .. } => "This field is required.".to_owned(),
            Self::TooLong { max, .. } => format!("Field cannot be longer than {} characters.", max),
            Self::TooShort { min, .. } => format!("Field must be at least {} characters long.", min),
            Self::InvalidFormat { reason, .. } => (*reason).to_owned(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::TooShort { field, min } => {
                write!(f, "{} must be at least {} characters", field, min)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "text",
            max: 140,
        };
        assert_eq!(err.to_string(), "text exceeds maximum length of 140 characters");
    }

    #[test]
    fn form_messages() {
        assert_eq!(
            ValidationError::Empty { field: "username" }.message(),
            "This field is required."
        );
        assert_eq!(
            ValidationError::TooShort { field: "password", min: 6 }.message(),
            "Field must be at least 6 characters long."
        );
        assert_eq!(
            ValidationError::InvalidFormat {
                field: "email",
                reason: "Invalid email address."
            }
            .message(),
            "Invalid email address."
        );
    }
}
