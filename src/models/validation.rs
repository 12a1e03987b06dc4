//! Field-level validation for request payloads
//!
//! Every create payload and update patch is checked here before anything
//! reaches the store.

use thiserror::Error;

/// Validation error for incoming payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// String doesn't match the required format
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Value is outside the allowed range
    #[error("{field}: {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },

    /// Request body could not be decoded
    #[error("malformed request body: {0}")]
    Malformed(String),
}

/// Convenience Result type for validation.
pub type ValidationResult = std::result::Result<(), ValidationError>;

/// Requires a non-blank string no longer than `max` characters.
pub fn require_text(field: &'static str, value: &str, max: usize) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Same as [`require_text`] but only when the value is present.
pub fn optional_text(field: &'static str, value: Option<&str>, max: usize) -> ValidationResult {
    value.map_or(Ok(()), |v| require_text(field, v, max))
}

/// Lowercase letters, digits and dashes.
pub fn require_slug(field: &'static str, value: &str) -> ValidationResult {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    let valid = value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must contain only lowercase letters, digits and dashes",
        });
    }
    Ok(())
}

/// One `@` with something on both sides.
pub fn require_email(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    let mut parts = value.split('@');
    let well_formed = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    );
    if !well_formed || value.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a valid email address",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "cohortName",
            max: 120,
        };
        assert_eq!(
            err.to_string(),
            "cohortName exceeds maximum length of 120 characters"
        );
    }

    #[test]
    fn text_rules() {
        assert!(require_text("name", "Ana", 10).is_ok());
        assert_eq!(
            require_text("name", "   ", 10),
            Err(ValidationError::Empty { field: "name" })
        );
        assert!(matches!(
            require_text("name", "abcdefghijk", 10),
            Err(ValidationError::TooLong { max: 10, .. })
        ));
        assert!(optional_text("name", None, 10).is_ok());
        assert!(optional_text("name", Some(""), 10).is_err());
    }

    #[test]
    fn slug_rules() {
        assert!(require_slug("cohortSlug", "web-dev-jan-2024").is_ok());
        assert!(require_slug("cohortSlug", "Web Dev").is_err());
        assert!(require_slug("cohortSlug", "").is_err());
    }

    #[test]
    fn email_rules() {
        assert!(require_email("email", "ana@example.com").is_ok());
        assert!(require_email("email", "ana.example.com").is_err());
        assert!(require_email("email", "@example.com").is_err());
        assert!(require_email("email", "ana@").is_err());
        assert!(require_email("email", "a@b@c").is_err());
        assert!(require_email("email", "an a@example.com").is_err());
    }
}
