//! # Mock Remote Procedure Surface
//!
//! The in-process stand-in for a real backend. Every call sleeps its
//! configured latency, then acts synchronously against the injected
//! stores.
//!
//! ## Call Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    MockApi                                              │
//! │                                                                         │
//! │  list_products()                 ──► catalog, 500ms                     │
//! │  get_product(slug)               ──► catalog, 300ms, NotFound on miss   │
//! │  login(email, password)          ──► 700ms, ONE accepted pair           │
//! │  list_orders(token)              ──► order book, 800ms, token-gated     │
//! │  checkout(items, token)          ──► order book, 1000ms, token-gated    │
//! │  list_reviews(product_id)        ──► review store, 400ms                │
//! │  submit_review(.., token, user)  ──► 600ms, token-gated + validated     │
//! │                                                                         │
//! │  Latency is a pure delay: no cancellation, no timeout, no retry.        │
//! │  Callers guard against stale responses with a Generation ticket.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use astra_core::validation::{validate_comment, validate_rating};
use astra_core::{CartItem, CoreError, Order, Product, Review, User};

use crate::catalog::Catalog;
use crate::config::{ApiConfig, DEMO_TOKEN};
use crate::error::ApiError;
use crate::orders::OrderBook;
use crate::reviews::ReviewStore;

/// Successful login payload: the user and their opaque session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// Successful checkout payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// Mock payment-session id (`cs_test_...`).
    pub session_id: String,
    /// The freshly created PENDING order.
    pub order: Order,
}

/// Review submission input, as supplied by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub rating: u8,
    pub comment: String,
}

/// The mock backend.
///
/// Owns shared handles to the injected stores; cloning is cheap and all
/// clones act on the same session state.
#[derive(Debug, Clone)]
pub struct MockApi {
    catalog: Arc<Catalog>,
    orders: Arc<OrderBook>,
    reviews: Arc<ReviewStore>,
    config: ApiConfig,
}

impl MockApi {
    /// Creates the mock backend over the given stores.
    pub fn new(
        catalog: Arc<Catalog>,
        orders: Arc<OrderBook>,
        reviews: Arc<ReviewStore>,
        config: ApiConfig,
    ) -> Self {
        MockApi {
            catalog,
            orders,
            reviews,
            config,
        }
    }

    /// Lists the full catalog, in its fixed stable order.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        debug!("api list_products");
        self.latency(self.config.products_latency_ms).await;
        Ok(self.catalog.list().to_vec())
    }

    /// Lists the curated featured subset, in display order.
    pub async fn list_featured(&self) -> Result<Vec<Product>, ApiError> {
        debug!("api list_featured");
        self.latency(self.config.products_latency_ms).await;
        Ok(self.catalog.featured())
    }

    /// Fetches one product by slug.
    pub async fn get_product(&self, slug: &str) -> Result<Product, ApiError> {
        debug!(slug, "api get_product");
        self.latency(self.config.product_latency_ms).await;
        self.catalog
            .find(slug)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Product", slug))
    }

    /// Authenticates against the single accepted demo credential pair.
    ///
    /// All other pairs fail with `INVALID_CREDENTIALS`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        debug!(email, "api login");
        self.latency(self.config.login_latency_ms).await;

        if email != self.config.demo_email || password != self.config.demo_password {
            return Err(CoreError::InvalidCredentials.into());
        }

        Ok(LoginResponse {
            user: User {
                id: "user-1".to_string(),
                email: self.config.demo_email.clone(),
                name: "Test User".to_string(),
            },
            token: DEMO_TOKEN.to_string(),
        })
    }

    /// Returns the session's orders, most-recent-first. Token-gated.
    pub async fn list_orders(&self, token: Option<&str>) -> Result<Vec<Order>, ApiError> {
        debug!("api list_orders");
        self.latency(self.config.orders_latency_ms).await;
        self.orders.fetch_orders(token).map_err(ApiError::from)
    }

    /// Converts a cart snapshot into a PENDING order. Token-gated, and
    /// the cart must be non-empty (checked in that order).
    ///
    /// On success the order's confirmation event is already scheduled;
    /// the caller is expected to clear its cart.
    pub async fn checkout(
        &self,
        items: &[CartItem],
        token: Option<&str>,
    ) -> Result<CheckoutResponse, ApiError> {
        debug!(items = items.len(), "api checkout");
        self.latency(self.config.checkout_latency_ms).await;

        let order = self.orders.checkout(items, token)?;
        Ok(CheckoutResponse {
            session_id: format!("cs_test_{}", Uuid::new_v4().simple()),
            order,
        })
    }

    /// Lists one product's reviews, newest first.
    pub async fn list_reviews(&self, product_id: &str) -> Result<Vec<Review>, ApiError> {
        debug!(product_id, "api list_reviews");
        self.latency(self.config.reviews_latency_ms).await;
        Ok(self.reviews.list(product_id))
    }

    /// Submits a review. Token-gated; rating and comment are validated
    /// here - the review store itself accepts whatever it is handed, so
    /// this gate is the required contract, not an optional nicety.
    pub async fn submit_review(
        &self,
        product_id: &str,
        input: &ReviewInput,
        token: Option<&str>,
        user: &User,
    ) -> Result<Review, ApiError> {
        debug!(product_id, rating = input.rating, "api submit_review");
        self.latency(self.config.submit_review_latency_ms).await;

        if token.is_none() {
            return Err(CoreError::AuthenticationRequired.into());
        }
        validate_rating(input.rating).map_err(CoreError::from)?;
        validate_comment(&input.comment).map_err(CoreError::from)?;

        Ok(self
            .reviews
            .submit(product_id, input.rating, input.comment.trim(), user))
    }

    /// Pure simulated latency. Zero is skipped entirely so instant
    /// configs do not touch the timer wheel.
    async fn latency(&self, ms: u64) {
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use astra_core::OrderStatus;

    fn api() -> MockApi {
        let config = ApiConfig::instant();
        MockApi::new(
            Arc::new(Catalog::demo()),
            Arc::new(OrderBook::new(
                config.confirm_delay(),
                config.shipping_address.clone(),
            )),
            Arc::new(ReviewStore::load(astra_store::StoreAdapter::in_memory())),
            config,
        )
    }

    fn demo_user() -> User {
        User {
            id: "user-1".to_string(),
            email: "test@example.com".to_string(),
            name: "Test User".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_products() {
        let api = api();
        let products = api.list_products().await.unwrap();
        assert_eq!(products.len(), 6);
        assert_eq!(products[0].slug, "quantum-core-laptop");
    }

    #[tokio::test]
    async fn test_get_product_found_and_missing() {
        let api = api();

        let product = api.get_product("nova-4k-monitor").await.unwrap();
        assert_eq!(product.price_cents, 65000);

        let err = api.get_product("flux-capacitor").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_login_accepts_only_demo_pair() {
        let api = api();

        let ok = api.login("test@example.com", "password").await.unwrap();
        assert_eq!(ok.token, DEMO_TOKEN);
        assert_eq!(ok.user.name, "Test User");

        let err = api.login("test@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);

        let err = api.login("other@example.com", "password").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_checkout_gates_then_orders() {
        let api = api();
        let product = api.get_product("aether-wireless-headphones").await.unwrap();
        let items = vec![CartItem::from_product(&product, 2)];

        let err = api.checkout(&items, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthenticationRequired);

        let err = api.checkout(&[], Some(DEMO_TOKEN)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);

        let response = api.checkout(&items, Some(DEMO_TOKEN)).await.unwrap();
        assert!(response.session_id.starts_with("cs_test_"));
        assert_eq!(response.order.status, OrderStatus::Pending);
        assert_eq!(response.order.total_cents, 49900);
    }

    #[tokio::test]
    async fn test_list_orders_requires_token() {
        let api = api();
        let err = api.list_orders(None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthenticationRequired);

        assert!(api.list_orders(Some(DEMO_TOKEN)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_review_boundaries() {
        let api = api();
        let user = demo_user();
        let token = Some(DEMO_TOKEN);

        for rating in [1u8, 5] {
            let input = ReviewInput {
                rating,
                comment: "Boundary rating accepted.".to_string(),
            };
            assert!(api.submit_review("3", &input, token, &user).await.is_ok());
        }

        for rating in [0u8, 6] {
            let input = ReviewInput {
                rating,
                comment: "Boundary rating rejected.".to_string(),
            };
            let err = api.submit_review("3", &input, token, &user).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }
    }

    #[tokio::test]
    async fn test_submit_review_rejects_empty_comment_and_missing_token() {
        let api = api();
        let user = demo_user();

        let input = ReviewInput {
            rating: 4,
            comment: "   ".to_string(),
        };
        let err = api
            .submit_review("3", &input, Some(DEMO_TOKEN), &user)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let input = ReviewInput {
            rating: 4,
            comment: "Fine product.".to_string(),
        };
        let err = api.submit_review("3", &input, None, &user).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthenticationRequired);
    }

    #[tokio::test]
    async fn test_list_reviews_scoped_to_product() {
        let api = api();
        let user = demo_user();
        let token = Some(DEMO_TOKEN);

        let input = ReviewInput {
            rating: 5,
            comment: "Laptop review.".to_string(),
        };
        api.submit_review("1", &input, token, &user).await.unwrap();

        assert_eq!(api.list_reviews("1").await.unwrap().len(), 1);
        assert!(api.list_reviews("2").await.unwrap().is_empty());
    }
}
