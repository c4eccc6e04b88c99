//! HTML form definitions
//!
//! Each form is the raw urlencoded body (every field defaults to empty so
//! a missing field fails validation instead of the extractor) plus a
//! `validate` step producing a typed input for the database layer.

pub mod validators;

use serde::Deserialize;

use crate::models::{MessageText, ValidationError};
use validators::{data_required, email, min_length, optional, MIN_PASSWORD_LEN};

/// Validation failures collected across all fields of a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<ValidationError>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record the error of a field check, returning the value when it passed.
    fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.0.push(e);
                None
            }
        }
    }

    /// Messages for one field, in the order they were found.
    pub fn for_field(&self, field: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|e| e.field() == field)
            .map(ValidationError::message)
            .collect()
    }
}

impl From<ValidationError> for FormErrors {
    fn from(e: ValidationError) -> Self {
        Self(vec![e])
    }
}

/// Form for adding messages
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageForm {
    pub text: String,
}

impl MessageForm {
    pub fn validate(&self) -> Result<MessageText, FormErrors> {
        MessageText::new(&self.text).map_err(FormErrors::from)
    }
}

/// Form for adding users
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserAddForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub image_url: String,
}

/// A validated signup
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub image_url: Option<String>,
}

impl UserAddForm {
    pub fn validate(&self) -> Result<NewUser, FormErrors> {
        let mut errors = FormErrors::new();

        let username = errors.check(data_required("username", &self.username));
        let address = errors
            .check(data_required("email", &self.email))
            .and_then(|v| errors.check(email("email", v)).map(|_| v));
        errors.check(min_length("password", &self.password, MIN_PASSWORD_LEN));

        match (username, address) {
            (Some(username), Some(address)) if errors.is_empty() => Ok(NewUser {
                username: username.to_owned(),
                email: address.to_owned(),
                password: self.password.clone(),
                image_url: optional(&self.image_url),
            }),
            _ => Err(errors),
        }
    }
}

/// Login form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Validated login credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FormErrors> {
        let mut errors = FormErrors::new();

        let username = errors.check(data_required("username", &self.username));
        errors.check(min_length("password", &self.password, MIN_PASSWORD_LEN));

        match username {
            Some(username) if errors.is_empty() => Ok(Credentials {
                username: username.to_owned(),
                password: self.password.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Form for editing the logged-in user's profile
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EditProfileForm {
    pub username: String,
    pub email: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: String,
    pub location: String,
    pub password: String,
}

/// A validated profile edit. `None` fields mean "left blank".
#[derive(Debug, Clone)]
pub struct ProfileEdit {
    pub username: String,
    pub email: Option<String>,
    pub image_url: Option<String>,
    pub header_image_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    /// Current password, re-entered to confirm the edit
    pub password: String,
}

impl EditProfileForm {
    pub fn validate(&self) -> Result<ProfileEdit, FormErrors> {
        let mut errors = FormErrors::new();

        let username = errors.check(data_required("username", &self.username));
        let address = optional(&self.email);
        if let Some(address) = &address {
            errors.check(email("email", address));
        }
        errors.check(min_length("password", &self.password, MIN_PASSWORD_LEN));

        match username {
            Some(username) if errors.is_empty() => Ok(ProfileEdit {
                username: username.to_owned(),
                email: address,
                image_url: optional(&self.image_url),
                header_image_url: optional(&self.header_image_url),
                bio: optional(&self.bio),
                location: optional(&self.location),
                password: self.password.clone(),
            }),
            _ => Err(errors),
        }
    }
}
