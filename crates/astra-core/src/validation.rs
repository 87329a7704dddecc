//! # Validation Module
//!
//! Input validation utilities for Astra Commerce.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API surface (Rust)                                           │
//! │  └── THIS MODULE: the required caller-side contract - the review       │
//! │      store itself accepts whatever is handed to it, so the API         │
//! │      surface MUST gate input through these checks                      │
//! │                                                                         │
//! │  Defense in depth: both layers catch different mistakes                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use astra_core::validation::{validate_rating, validate_comment};
//!
//! validate_rating(5).unwrap();
//! validate_comment("Great headphones, the ANC is superb.").unwrap();
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum accepted review comment length, in characters.
pub const MAX_COMMENT_LEN: usize = 2000;

// =============================================================================
// Review Validators
// =============================================================================

/// Validates a review star rating.
///
/// ## Rules
/// - Must be between 1 and 5 inclusive
///
/// ## Example
/// ```rust
/// use astra_core::validation::validate_rating;
///
/// assert!(validate_rating(1).is_ok());
/// assert!(validate_rating(5).is_ok());
/// assert!(validate_rating(0).is_err());
/// assert!(validate_rating(6).is_err());
/// ```
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: 5,
        });
    }

    Ok(())
}

/// Validates a review comment.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_COMMENT_LEN`] characters
pub fn validate_comment(comment: &str) -> ValidationResult<()> {
    let comment = comment.trim();

    if comment.is_empty() {
        return Err(ValidationError::Required {
            field: "comment".to_string(),
        });
    }

    if comment.chars().count() > MAX_COMMENT_LEN {
        return Err(ValidationError::TooLong {
            field: "comment".to_string(),
            max: MAX_COMMENT_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be positive (> 0); zero/negative quantities are expressed as
///   removal at the cart layer, never stored
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Auth Validators
// =============================================================================

/// Validates the shape of an email address for the login form.
///
/// ## Rules
/// - Must not be empty
/// - Must contain exactly one `@` with a non-empty local part and a
///   domain containing a dot
///
/// This is a shape check, not RFC 5322; the mock backend only accepts a
/// single hardcoded credential pair anyway.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rating_boundaries() {
        // Boundary check: 1 and 5 accepted, 0 and 6 rejected
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(3).is_ok());
        assert!(validate_rating(5).is_ok());

        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_comment() {
        assert!(validate_comment("Solid build quality.").is_ok());

        assert!(validate_comment("").is_err());
        assert!(validate_comment("   ").is_err());
        assert!(validate_comment(&"a".repeat(MAX_COMMENT_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("  test@example.com  ").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("test").is_err());
        assert!(validate_email("test@").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("test@example").is_err());
    }
}
