//! Member validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during member validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MemberValidationError {
    #[error("Member ID cannot be empty")]
    EmptyId,

    #[error("Member ID must be 'COOP-' followed by digits")]
    MalformedId,

    #[error("Name is required")]
    EmptyName,

    #[error("Address is required")]
    EmptyAddress,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number")]
    InvalidPhone,

    #[error("Password must be at least {0} characters with uppercase, lowercase, and number")]
    WeakPassword(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

// Applied after stripping spaces, dots, dashes, and parentheses
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone regex"));

/// Validate a member id: `COOP-` prefix followed by at least one digit
pub fn validate_member_id(id: &str) -> Result<(), MemberValidationError> {
    if id.is_empty() {
        return Err(MemberValidationError::EmptyId);
    }

    let digits = id
        .strip_prefix("COOP-")
        .ok_or(MemberValidationError::MalformedId)?;

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(MemberValidationError::MalformedId);
    }

    Ok(())
}

/// Validate an email address (shape check only, no deliverability)
pub fn validate_email(email: &str) -> Result<(), MemberValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(MemberValidationError::InvalidEmail)
    }
}

/// Validate a phone number, tolerating common separators
pub fn validate_phone(phone: &str) -> Result<(), MemberValidationError> {
    let stripped: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();

    if PHONE_RE.is_match(&stripped) {
        Ok(())
    } else {
        Err(MemberValidationError::InvalidPhone)
    }
}

/// Validate password strength
///
/// Rules:
/// - 8 to 128 characters
/// - At least one uppercase letter, one lowercase letter, and one digit
pub fn validate_password(password: &str) -> Result<(), MemberValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(MemberValidationError::WeakPassword(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(MemberValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_lower && has_upper && has_digit {
        Ok(())
    } else {
        Err(MemberValidationError::WeakPassword(MIN_PASSWORD_LENGTH))
    }
}

/// Validate required profile text fields
pub fn validate_name(name: &str) -> Result<(), MemberValidationError> {
    if name.trim().is_empty() {
        return Err(MemberValidationError::EmptyName);
    }
    Ok(())
}

pub fn validate_address(address: &str) -> Result<(), MemberValidationError> {
    if address.trim().is_empty() {
        return Err(MemberValidationError::EmptyAddress);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Member ID tests
    #[test]
    fn test_valid_member_ids() {
        assert!(validate_member_id("COOP-0001").is_ok());
        assert!(validate_member_id("COOP-1000").is_ok());
        assert!(validate_member_id("COOP-1234567").is_ok());
    }

    #[test]
    fn test_invalid_member_ids() {
        assert_eq!(validate_member_id(""), Err(MemberValidationError::EmptyId));
        assert_eq!(
            validate_member_id("COOP-"),
            Err(MemberValidationError::MalformedId)
        );
        assert_eq!(
            validate_member_id("COOP-12a4"),
            Err(MemberValidationError::MalformedId)
        );
        assert_eq!(
            validate_member_id("LN-1000"),
            Err(MemberValidationError::MalformedId)
        );
    }

    // Email tests
    #[test]
    fn test_valid_emails() {
        assert!(validate_email("admin@coop.com").is_ok());
        assert!(validate_email("john@example.com").is_ok());
        assert!(validate_email("a.b+c@d.co").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@example.com").is_err());
        assert!(validate_email("spaces in@example.com").is_err());
        assert!(validate_email("nodot@example").is_err());
    }

    // Phone tests
    #[test]
    fn test_valid_phones() {
        assert!(validate_phone("+1234567890").is_ok());
        assert!(validate_phone("1234567890").is_ok());
        assert!(validate_phone("+1 (234) 567-890").is_ok());
        assert!(validate_phone("123.456.7890").is_ok());
    }

    #[test]
    fn test_invalid_phones() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("0123456").is_err()); // leading zero
        assert!(validate_phone("phone").is_err());
        assert!(validate_phone("+12345678901234567").is_err()); // too long
    }

    // Password tests
    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("Welcome123").is_ok());
        assert!(validate_password("Aa345678").is_ok());
    }

    #[test]
    fn test_weak_passwords() {
        assert!(validate_password("short1A").is_err()); // too short
        assert!(validate_password("alllowercase1").is_err()); // no uppercase
        assert!(validate_password("ALLUPPERCASE1").is_err()); // no lowercase
        assert!(validate_password("NoDigitsHere").is_err());
    }

    #[test]
    fn test_password_too_long() {
        let long = format!("Aa1{}", "x".repeat(126));
        assert_eq!(
            validate_password(&long),
            Err(MemberValidationError::PasswordTooLong(128))
        );
    }

    // Profile field tests
    #[test]
    fn test_required_fields() {
        assert!(validate_name("John Smith").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_address("456 Member Ave, City").is_ok());
        assert!(validate_address("").is_err());
    }
}
