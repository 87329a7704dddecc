//! # API Configuration
//!
//! Configuration for the mock RPC surface: per-call simulated latencies,
//! the order-confirmation delay, and the demo fixtures.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`ASTRA_*`)
//! 2. Defaults (this file, mirroring the demo backend's timings)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The opaque session token issued to the demo user on login.
pub const DEMO_TOKEN: &str = "mock-jwt-token-string";

/// API configuration.
///
/// Latencies are stored in milliseconds so the struct stays serializable
/// for the frontend; use the `Duration` accessors in Rust code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Simulated latency of `list_products`, in milliseconds.
    pub products_latency_ms: u64,

    /// Simulated latency of `get_product`.
    pub product_latency_ms: u64,

    /// Simulated latency of `login`.
    pub login_latency_ms: u64,

    /// Simulated latency of `list_orders`.
    pub orders_latency_ms: u64,

    /// Simulated latency of `checkout`.
    pub checkout_latency_ms: u64,

    /// Simulated latency of `list_reviews`.
    pub reviews_latency_ms: u64,

    /// Simulated latency of `submit_review`.
    pub submit_review_latency_ms: u64,

    /// Delay before a new order auto-advances PENDING → PROCESSING,
    /// modeling an out-of-band confirmation event (payment webhook).
    pub confirm_delay_ms: u64,

    /// Shipping destination stamped on every demo order.
    pub shipping_address: String,

    /// The single accepted login email.
    pub demo_email: String,

    /// The single accepted login password.
    pub demo_password: String,
}

impl Default for ApiConfig {
    /// Returns the demo defaults.
    ///
    /// ## Default Values
    /// Latencies mirror the original demo backend's timings; the
    /// confirmation event fires two seconds after checkout.
    fn default() -> Self {
        ApiConfig {
            products_latency_ms: 500,
            product_latency_ms: 300,
            login_latency_ms: 700,
            orders_latency_ms: 800,
            checkout_latency_ms: 1000,
            reviews_latency_ms: 400,
            submit_review_latency_ms: 600,
            confirm_delay_ms: 2000,
            shipping_address: "123 Quantum Way, Cybertown, 98765".to_string(),
            demo_email: "test@example.com".to_string(),
            demo_password: "password".to_string(),
        }
    }
}

impl ApiConfig {
    /// Creates an ApiConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `ASTRA_CONFIRM_DELAY_MS`: Override the confirmation delay
    /// - `ASTRA_DEMO_EMAIL`: Override the accepted login email
    /// - `ASTRA_DEMO_PASSWORD`: Override the accepted login password
    pub fn from_env() -> Self {
        let mut config = ApiConfig::default();

        if let Ok(delay) = std::env::var("ASTRA_CONFIRM_DELAY_MS") {
            if let Ok(ms) = delay.parse::<u64>() {
                config.confirm_delay_ms = ms;
            }
        }

        if let Ok(email) = std::env::var("ASTRA_DEMO_EMAIL") {
            config.demo_email = email;
        }

        if let Ok(password) = std::env::var("ASTRA_DEMO_PASSWORD") {
            config.demo_password = password;
        }

        config
    }

    /// Returns a configuration with every delay zeroed.
    ///
    /// ## Usage
    /// Tests: calls return as fast as the runtime allows, and the
    /// confirmation event fires on the next timer tick.
    pub fn instant() -> Self {
        ApiConfig {
            products_latency_ms: 0,
            product_latency_ms: 0,
            login_latency_ms: 0,
            orders_latency_ms: 0,
            checkout_latency_ms: 0,
            reviews_latency_ms: 0,
            submit_review_latency_ms: 0,
            confirm_delay_ms: 0,
            ..ApiConfig::default()
        }
    }

    /// The confirmation delay as a Duration.
    #[inline]
    pub fn confirm_delay(&self) -> Duration {
        Duration::from_millis(self.confirm_delay_ms)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
