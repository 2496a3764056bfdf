//! Enrollment credentials.

use std::fmt;

use crate::error::ValidationError;

/// Validated enrollment ID and secret.
///
/// Construction is the only validation step of login, so a value of this
/// type never reaches the transport with an empty field.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    enrollment_id: &'a str,
    enrollment_secret: &'a str,
}

impl<'a> Credentials<'a> {
    /// Validate a credential pair.
    ///
    /// # Errors
    ///
    /// Returns `MissingEnrollmentId` if `enrollment_id` is empty, otherwise
    /// `MissingEnrollmentSecret` if `enrollment_secret` is empty.
    pub fn new(enrollment_id: &'a str, enrollment_secret: &'a str) -> Result<Self, ValidationError> {
        if enrollment_id.is_empty() {
            return Err(ValidationError::MissingEnrollmentId);
        }
        if enrollment_secret.is_empty() {
            return Err(ValidationError::MissingEnrollmentSecret);
        }

        Ok(Self { enrollment_id, enrollment_secret })
    }

    /// Enrollment ID.
    pub fn enrollment_id(&self) -> &'a str {
        self.enrollment_id
    }

    /// Enrollment secret.
    pub fn enrollment_secret(&self) -> &'a str {
        self.enrollment_secret
    }
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("enrollment_id", &self.enrollment_id)
            .field("enrollment_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_fields() {
        let credentials = Credentials::new("doge", "suchsecret").unwrap();
        assert_eq!(credentials.enrollment_id(), "doge");
        assert_eq!(credentials.enrollment_secret(), "suchsecret");
    }

    #[test]
    fn id_is_checked_first() {
        assert_eq!(Credentials::new("", ""), Err(ValidationError::MissingEnrollmentId));
        assert_eq!(Credentials::new("", "suchsecret"), Err(ValidationError::MissingEnrollmentId));
        assert_eq!(Credentials::new("doge", ""), Err(ValidationError::MissingEnrollmentSecret));
    }

    #[test]
    fn debug_redacts_secret() {
        let credentials = Credentials::new("doge", "suchsecret").unwrap();
        let debug = format!("{credentials:?}");
        assert!(debug.contains("doge"));
        assert!(!debug.contains("suchsecret"));
    }
}
