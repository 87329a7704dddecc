//! # Storage Keys
//!
//! The full set of keys used against the durable substrate. Each key
//! holds one JSON-encoded value of the corresponding entity.

/// The persisted cart (serialized `Cart`).
pub const CART: &str = "cart";

/// The authenticated user (serialized `User`).
pub const USER: &str = "user";

/// The session token (serialized `String`).
pub const TOKEN: &str = "token";

/// The review collection (serialized `Vec<Review>`).
pub const REVIEWS: &str = "reviews";
