//! # Error Types
//!
//! Domain-specific error types for astra-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  astra-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule / gate failures                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  astra-store errors (separate crate)                                   │
//! │  └── StoreError       - Storage failures (never cross the adapter)     │
//! │                                                                         │
//! │  astra-api errors                                                      │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (slug, order id, field name)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent gate failures and business rule violations.
/// Every operation-level failure is surfaced once, as a distinguishable
/// variant; there is no retry policy anywhere in the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A token-gated operation was invoked without a session token.
    ///
    /// ## When This Occurs
    /// - Checkout while logged out
    /// - Fetching order history while logged out
    /// - Submitting a review while logged out
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Login was attempted with an email/password pair that is not the
    /// single accepted demo credential pair.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Checkout was attempted on a cart with no items.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart page → "Checkout" with 0 items
    ///      │
    ///      ▼
    /// EmptyCart
    ///      │
    ///      ▼
    /// UI shows: "Cart is empty"
    /// ```
    #[error("Cart is empty")]
    EmptyCart,

    /// Product cannot be found by its slug.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Order cannot be found by its id.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
