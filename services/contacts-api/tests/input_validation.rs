//! Input validation tests
//!
//! Tests for security-critical input validation in contacts-api.

/// Minimum password length (must match handler constant)
const MIN_PASSWORD_LEN: usize = 8;

/// Validate a registration email (mirrors the handler logic for testing)
fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("email cannot be empty");
    }
    let Some(at) = email.find('@') else {
        return Err("email must contain '@'");
    };
    if at == 0 || at == email.len() - 1 {
        return Err("email must have a local part and a domain");
    }
    Ok(())
}

/// Validate a registration password (mirrors the handler logic for testing)
fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err("password must be at least 8 characters");
    }
    Ok(())
}

use carnet_auth_core::ALLOWED_IMAGE_TYPES;

// ============================================================================
// Valid Emails
// ============================================================================

#[test]
fn test_valid_simple_email() {
    assert!(validate_email("user@example.com").is_ok());
}

#[test]
fn test_valid_email_with_plus_tag() {
    assert!(validate_email("user+tag@example.com").is_ok());
}

#[test]
fn test_valid_email_with_subdomain() {
    assert!(validate_email("user@mail.example.com").is_ok());
}

#[test]
fn test_valid_email_with_surrounding_whitespace() {
    assert!(validate_email("  user@example.com  ").is_ok());
}

// ============================================================================
// Invalid Emails
// ============================================================================

#[test]
fn test_invalid_empty_email() {
    assert!(validate_email("").is_err());
}

#[test]
fn test_invalid_whitespace_only_email() {
    assert!(validate_email("   ").is_err());
}

#[test]
fn test_invalid_email_without_at() {
    assert!(validate_email("user.example.com").is_err());
}

#[test]
fn test_invalid_email_missing_local_part() {
    assert!(validate_email("@example.com").is_err());
}

#[test]
fn test_invalid_email_missing_domain() {
    assert!(validate_email("user@").is_err());
}

// ============================================================================
// Passwords
// ============================================================================

#[test]
fn test_valid_min_length_password() {
    assert!(validate_password("12345678").is_ok());
}

#[test]
fn test_valid_long_password() {
    assert!(validate_password(&"a".repeat(128)).is_ok());
}

#[test]
fn test_invalid_empty_password() {
    assert!(validate_password("").is_err());
}

#[test]
fn test_invalid_short_password() {
    assert!(validate_password("1234567").is_err());
}

// ============================================================================
// Avatar Content Types
// ============================================================================

#[test]
fn test_allowed_jpeg() {
    assert!(ALLOWED_IMAGE_TYPES.contains(&"image/jpeg"));
}

#[test]
fn test_allowed_png() {
    assert!(ALLOWED_IMAGE_TYPES.contains(&"image/png"));
}

#[test]
fn test_disallowed_gif() {
    assert!(!ALLOWED_IMAGE_TYPES.contains(&"image/gif"));
}

#[test]
fn test_disallowed_svg() {
    assert!(!ALLOWED_IMAGE_TYPES.contains(&"image/svg+xml"));
}

#[test]
fn test_content_type_matching_is_exact() {
    // Parameters and casing are not stripped before the check
    assert!(!ALLOWED_IMAGE_TYPES.contains(&"image/jpeg; charset=utf-8"));
    assert!(!ALLOWED_IMAGE_TYPES.contains(&"IMAGE/PNG"));
}
