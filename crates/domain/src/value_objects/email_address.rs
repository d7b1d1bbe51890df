//! Email address value object with validation
//!
//! Provides a validated email address type that ensures proper format.
//! Addresses are checked against the standard email grammar and must
//! additionally carry a dot in the domain part, so bare hostnames like
//! `user@localhost` are rejected before any SMTP traffic happens.
//!
//! # Examples
//!
//! ```
//! use domain::EmailAddress;
//!
//! let email = EmailAddress::new("lector@ejemplo.com").unwrap();
//! assert_eq!(email.as_str(), "lector@ejemplo.com");
//!
//! // Addresses are normalized to lowercase
//! let email = EmailAddress::new("Lector@Ejemplo.COM").unwrap();
//! assert_eq!(email.as_str(), "lector@ejemplo.com");
//!
//! // Invalid addresses are rejected
//! assert!(EmailAddress::new("invalid").is_err());
//! assert!(EmailAddress::new("a@b").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A validated recipient or sender email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct EmailAddress {
    #[validate(email)]
    value: String,
}

impl EmailAddress {
    /// Create a new email address, validating the format
    ///
    /// # Errors
    ///
    /// Returns an error if the address is empty, does not parse as an
    /// email, or has no dot in its domain part.
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let value = email.into().trim().to_lowercase();

        let candidate = Self { value };
        candidate
            .validate()
            .map_err(|e| DomainError::InvalidEmailAddress(e.to_string()))?;

        // "a@b" passes the email grammar but is useless as a mail
        // destination here; require a dotted domain.
        if !candidate.domain().contains('.') {
            return Err(DomainError::InvalidEmailAddress(format!(
                "domain part has no dot: {}",
                candidate.value
            )));
        }

        Ok(candidate)
    }

    /// Get the email address as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the local part (before @)
    pub fn local_part(&self) -> &str {
        self.value.split('@').next().unwrap_or("")
    }

    /// Get the domain part (after @)
    pub fn domain(&self) -> &str {
        self.value.split('@').nth(1).unwrap_or("")
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_is_accepted() {
        let email = EmailAddress::new("lector@ejemplo.com").unwrap();
        assert_eq!(email.as_str(), "lector@ejemplo.com");
    }

    #[test]
    fn short_but_dotted_address_is_accepted() {
        let email = EmailAddress::new("a@b.c").unwrap();
        assert_eq!(email.as_str(), "a@b.c");
    }

    #[test]
    fn email_is_normalized_to_lowercase() {
        let email = EmailAddress::new("Lector@Ejemplo.COM").unwrap();
        assert_eq!(email.as_str(), "lector@ejemplo.com");
    }

    #[test]
    fn email_parts_are_extracted() {
        let email = EmailAddress::new("frodo@bolson.com").unwrap();
        assert_eq!(email.local_part(), "frodo");
        assert_eq!(email.domain(), "bolson.com");
    }

    #[test]
    fn invalid_email_is_rejected() {
        assert!(EmailAddress::new("").is_err());
        assert!(EmailAddress::new("abc").is_err());
        assert!(EmailAddress::new("@nodomain.com").is_err());
        assert!(EmailAddress::new("noat.com").is_err());
    }

    #[test]
    fn dotless_domain_is_rejected() {
        assert!(EmailAddress::new("a@b").is_err());
        assert!(EmailAddress::new("user@localhost").is_err());
    }

    #[test]
    fn whitespace_trimmed() {
        let email = EmailAddress::new("  test@example.com  ").unwrap();
        assert_eq!(email.as_str(), "test@example.com");
    }

    #[test]
    fn display_format() {
        let email = EmailAddress::new("test@example.com").unwrap();
        assert_eq!(email.to_string(), "test@example.com");
    }

    #[test]
    fn try_from_string() {
        let email: EmailAddress = "test@example.com".to_string().try_into().unwrap();
        assert_eq!(email.as_str(), "test@example.com");
    }

    #[test]
    fn serialization_roundtrip() {
        let email = EmailAddress::new("test@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        let parsed: EmailAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(email, parsed);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Strategy for generating valid email local parts
    fn valid_local_part() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9._-]{0,15}".prop_map(|s| s.to_lowercase())
    }

    /// Strategy for generating valid email domains
    fn valid_domain() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,10}\\.[a-z]{2,4}".prop_map(|s| s.to_lowercase())
    }

    proptest! {
        #[test]
        fn valid_emails_are_accepted(
            local in valid_local_part(),
            domain in valid_domain()
        ) {
            let email_str = format!("{local}@{domain}");
            // Not all generated combinations are valid emails, but valid ones should parse
            if let Ok(email) = EmailAddress::new(&email_str) {
                prop_assert!(email.as_str().contains('@'));
                prop_assert!(email.domain().contains('.'));
            }
        }

        #[test]
        fn email_is_always_lowercase(input in "[A-Za-z]+@[A-Za-z]+\\.[a-z]{2,3}") {
            if let Ok(email) = EmailAddress::new(&input) {
                prop_assert_eq!(email.as_str(), email.as_str().to_lowercase());
            }
        }

        #[test]
        fn email_roundtrips_through_display(
            local in valid_local_part(),
            domain in valid_domain()
        ) {
            let email_str = format!("{local}@{domain}");
            if let Ok(email) = EmailAddress::new(&email_str) {
                let displayed = email.to_string();
                let reparsed = EmailAddress::new(&displayed).unwrap();
                prop_assert_eq!(email, reparsed);
            }
        }

        #[test]
        fn strings_without_at_are_rejected(s in "[a-zA-Z0-9.]+") {
            prop_assume!(!s.contains('@'));
            prop_assert!(EmailAddress::new(&s).is_err());
        }
    }
}
