//! Contact form validation.
//!
//! Every field is checked on each pass so all problems are reported at once.

use regex::Regex;

use crate::error::{Error, Result};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Shortest accepted name, in characters.
pub const MIN_NAME_CHARS: usize = 2;

/// Shortest accepted message, in characters.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Raw contact form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Message body.
    pub message: String,
}

/// One failed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name (`name`, `email`, `message`).
    pub field: &'static str,
    /// Message shown next to the field.
    pub message: &'static str,
}

/// Checks [`ContactForm`] input.
#[derive(Debug, Clone)]
pub struct ContactValidator {
    email: Regex,
}

impl ContactValidator {
    /// Create a validator.
    ///
    /// # Errors
    ///
    /// Returns an error if the email pattern fails to compile.
    pub fn new() -> Result<Self> {
        let email = Regex::new(EMAIL_PATTERN)
            .map_err(|e| Error::internal(format!("invalid email pattern: {e}")))?;
        Ok(Self { email })
    }

    /// Check a single field after trimming. Unknown fields always pass.
    #[must_use]
    pub fn check_field(&self, field: &str, value: &str) -> Option<FieldError> {
        let value = value.trim();
        match field {
            "name" if value.chars().count() < MIN_NAME_CHARS => Some(FieldError {
                field: "name",
                message: "Name must be at least 2 characters long",
            }),
            "email" if !self.email.is_match(value) => Some(FieldError {
                field: "email",
                message: "Please enter a valid email address",
            }),
            "message" if value.chars().count() < MIN_MESSAGE_CHARS => Some(FieldError {
                field: "message",
                message: "Message must be at least 10 characters long",
            }),
            _ => None,
        }
    }

    /// Check every field; an empty result means the form is valid.
    #[must_use]
    pub fn validate(&self, form: &ContactForm) -> Vec<FieldError> {
        [
            ("name", form.name.as_str()),
            ("email", form.email.as_str()),
            ("message", form.message.as_str()),
        ]
        .into_iter()
        .filter_map(|(field, value)| self.check_field(field, value))
        .collect()
    }
}
