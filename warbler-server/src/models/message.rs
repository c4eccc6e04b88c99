//! Message text validation

use super::ValidationError;

/// Maximum length of a message, in characters
pub const MAX_MESSAGE_LEN: usize = 140;

/// Validated message text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    /// Create message text.
    ///
    /// # Rules
    /// - Must contain something other than whitespace
    /// - Max 140 characters (counted as chars, not bytes)
    ///
    /// # Example
    /// ```
    /// use warbler_server::models::MessageText;
    ///
    /// assert!(MessageText::new("hello, warbler").is_ok());
    /// assert!(MessageText::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "text" });
        }

        if s.chars().count() > MAX_MESSAGE_LEN {
            return Err(ValidationError::TooLong {
                field: "text",
                max: MAX_MESSAGE_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
