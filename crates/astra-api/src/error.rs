//! # API Error Type
//!
//! Unified error type for the mock RPC surface.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Astra Commerce                         │
//! │                                                                         │
//! │  Frontend                    Rust Core                                  │
//! │  ────────                    ─────────                                  │
//! │                                                                         │
//! │  api.checkout(cart, token)                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  MockApi method                                                  │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Gate failure? ──── CoreError::AuthenticationRequired ──┐        │  │
//! │  │         │                                               │        │  │
//! │  │         ▼                                               ▼        │  │
//! │  │  Validation failure? ── CoreError::Validation ────── ApiError ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.message = "Cart is empty"                                       │
//! │    // e.code = "EMPTY_CART"                                             │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage-corruption failures never appear here: they are recovered
//! inside astra-store's adapter and only show up as WARN logs.

use serde::Serialize;

use astra_core::CoreError;

/// API error returned from mock RPC calls.
///
/// ## Serialization
/// This is what the frontend receives when a call fails:
/// ```json
/// {
///   "code": "INVALID_CREDENTIALS",
///   "message": "Invalid credentials"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await api.checkout(cart, token);
/// } catch (e) {
///   switch (e.code) {
///     case 'AUTHENTICATION_REQUIRED':
///       navigateTo('login');
///       break;
///     case 'EMPTY_CART':
///       showNotification('Your cart is empty');
///       break;
///     default:
///       showError(e.message);
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A token-gated call was made without a session token
    AuthenticationRequired,

    /// Login rejected (not the accepted demo credential pair)
    InvalidCredentials,

    /// Checkout attempted with no cart items
    EmptyCart,

    /// Input validation failed (rating out of range, empty comment, ...)
    ValidationError,

    /// Resource not found (unknown product slug, unknown order id)
    NotFound,

    /// Unexpected internal failure
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::AuthenticationRequired => ErrorCode::AuthenticationRequired,
            CoreError::InvalidCredentials => ErrorCode::InvalidCredentials,
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            CoreError::ProductNotFound(_) | CoreError::OrderNotFound(_) => ErrorCode::NotFound,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
