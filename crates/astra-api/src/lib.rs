//! # astra-api: Session State & Mock RPC for Astra Commerce
//!
//! This crate composes `astra-core` and `astra-store` into a storefront
//! session: restored cart/auth state, the catalog, the order book with
//! its simulated confirmation event, the persisted review store, and the
//! latency-simulating mock backend.
//!
//! ## Module Organization
//! ```text
//! astra_api/
//! ├── lib.rs          ◄─── You are here (Storefront wiring)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart state, mirrored per mutation
//! │   └── auth.rs     ◄─── Auth state (user/token pair)
//! ├── catalog.rs      ◄─── Read-only product catalog
//! ├── orders.rs       ◄─── Order book + confirmation-task registry
//! ├── reviews.rs      ◄─── Persisted append-only reviews
//! ├── api.rs          ◄─── MockApi (simulated-latency RPC surface)
//! ├── generation.rs   ◄─── Stale-response guard
//! ├── config.rs       ◄─── ApiConfig (latencies, fixtures)
//! └── error.rs        ◄─── ApiError for the RPC boundary
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Startup                                   │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Open the Durable Substrate ───────────────────────────────────────► │
//! │     • FileStore at the platform data dir (or MemoryStore)               │
//! │                                                                         │
//! │  3. Restore State ────────────────────────────────────────────────────► │
//! │     • CartState: persisted cart, corrupt ⇒ empty + entry removed        │
//! │     • AuthState: user/token pair, corrupt ⇒ both keys cleared           │
//! │     • ReviewStore: persisted collection                                 │
//! │                                                                         │
//! │  4. Build Session Objects ────────────────────────────────────────────► │
//! │     • Catalog (demo seed), OrderBook (empty), MockApi, Generation       │
//! │                                                                         │
//! │  The presentation layer drives everything through Storefront.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generation;
pub mod orders;
pub mod reviews;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::{CheckoutResponse, LoginResponse, MockApi, ReviewInput};
pub use catalog::Catalog;
pub use config::{ApiConfig, DEMO_TOKEN};
pub use error::{ApiError, ErrorCode};
pub use generation::{Generation, Ticket};
pub use orders::OrderBook;
pub use reviews::ReviewStore;
pub use state::{AuthState, CartState, Session};

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use astra_core::{Order, Product, Review, User};
use astra_store::StoreAdapter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=astra=trace` - Show trace for astra crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,astra=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// One storefront session: restored state + injected stores + the mock
/// backend, wired together.
///
/// All component handles are cheap clones over shared state; the session
/// owns nothing global, so tests build as many isolated sessions as they
/// need.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub catalog: Arc<Catalog>,
    pub cart: CartState,
    pub auth: AuthState,
    pub orders: Arc<OrderBook>,
    pub reviews: Arc<ReviewStore>,
    pub api: MockApi,
    pub generation: Generation,
}

impl Storefront {
    /// Builds a session over the given substrate and configuration.
    pub fn new(store: StoreAdapter, config: ApiConfig) -> Self {
        let catalog = Arc::new(Catalog::demo());
        let cart = CartState::load(store.clone());
        let auth = AuthState::load(store.clone());
        let orders = Arc::new(OrderBook::new(
            config.confirm_delay(),
            config.shipping_address.clone(),
        ));
        let reviews = Arc::new(ReviewStore::load(store));
        let api = MockApi::new(
            Arc::clone(&catalog),
            Arc::clone(&orders),
            Arc::clone(&reviews),
            config,
        );

        info!("Storefront session ready");

        Storefront {
            catalog,
            cart,
            auth,
            orders,
            reviews,
            api,
            generation: Generation::new(),
        }
    }

    /// Builds a session over a fresh in-memory substrate with default
    /// configuration.
    pub fn in_memory() -> Self {
        Storefront::new(StoreAdapter::in_memory(), ApiConfig::default())
    }

    /// Logs in through the mock backend and stores the session pair.
    ///
    /// The email shape is checked before the call goes out, standing in
    /// for the login form's client-side validation; a malformed address
    /// never reaches the mock backend.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        astra_core::validation::validate_email(email)
            .map_err(astra_core::CoreError::from)?;
        let response = self.api.login(email, password).await?;
        self.auth.login(response.user.clone(), response.token);
        Ok(response.user)
    }

    /// Logs out, clearing the stored session pair.
    pub fn logout(&self) {
        self.auth.logout();
    }

    /// Checks out the current cart.
    ///
    /// Snapshots the cart, runs the token-gated checkout, and clears the
    /// cart only on success - a failed checkout leaves the cart intact.
    pub async fn checkout(&self) -> Result<Order, ApiError> {
        let items = self.cart.snapshot();
        let response = self.api.checkout(&items, self.auth.token().as_deref()).await?;
        self.cart.clear();
        Ok(response.order)
    }

    /// Fetches the session's order history, most-recent-first.
    pub async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.api.list_orders(self.auth.token().as_deref()).await
    }

    /// Submits a review as the signed-in user.
    pub async fn submit_review(
        &self,
        product_id: &str,
        input: &ReviewInput,
    ) -> Result<Review, ApiError> {
        let user = self
            .auth
            .user()
            .ok_or_else(|| ApiError::from(astra_core::CoreError::AuthenticationRequired))?;
        self.api
            .submit_review(product_id, input, self.auth.token().as_deref(), &user)
            .await
    }

    /// Convenience catalog lookup for add-to-cart flows.
    pub fn find_product(&self, slug: &str) -> Option<Product> {
        self.catalog.find(slug).cloned()
    }
}

// =============================================================================
// End-to-End Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use astra_core::OrderStatus;
    use std::time::Duration;

    /// Past the default 2s confirmation delay, on the paused clock.
    const CONFIRM_WAIT: Duration = Duration::from_millis(2100);

    /// The full demo journey: browse → cart → login → checkout →
    /// confirmation event → order history.
    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_checkout_flow() {
        let session = Storefront::in_memory();

        // Browse: the catalog serves the product by slug
        let headphones = session
            .api
            .get_product("aether-wireless-headphones")
            .await
            .unwrap();
        assert_eq!(headphones.name, "Aether Wireless Headphones");
        assert_eq!(headphones.price_cents, 24950);

        // Cart: €249.50 × 2 = €499.00
        session.cart.add(&headphones, 2);
        assert_eq!(session.cart.total_cents(), 49900);

        // Checkout while logged out fails and leaves the cart intact
        let err = session.checkout().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthenticationRequired);
        assert_eq!(session.cart.count(), 2);

        // Login with the one valid credential pair
        let user = session.login("test@example.com", "password").await.unwrap();
        assert_eq!(user.id, "user-1");
        assert!(session.auth.is_authenticated());

        // Checkout: order total matches the cart total at this moment,
        // status starts PENDING, and the cart is emptied
        let order = session.checkout().await.unwrap();
        assert_eq!(order.total_cents, 49900);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(session.cart.is_empty());

        // The confirmation event advances PENDING → PROCESSING
        tokio::time::sleep(CONFIRM_WAIT).await;
        tokio::task::yield_now().await;
        let orders = session.fetch_orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, order.id);
        assert_eq!(orders[0].status, OrderStatus::Processing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_total_survives_catalog_price_change() {
        let session = Storefront::in_memory();
        let mut product = session.find_product("chronos-smartwatch").unwrap();

        session.cart.add(&product, 1);
        session.login("test@example.com", "password").await.unwrap();
        let order = session.checkout().await.unwrap();

        // "Catalog" price changes later; the order keeps the old price
        product.price_cents = 1;
        assert_eq!(order.total_cents, 19999);
        assert_eq!(order.items[0].price_at_purchase_cents, 19999);
    }

    #[tokio::test(start_paused = true)]
    async fn test_review_flow_requires_login() {
        let session = Storefront::in_memory();
        let input = ReviewInput {
            rating: 5,
            comment: "Best keyboard I have typed on.".to_string(),
        };

        let err = session.submit_review("6", &input).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthenticationRequired);

        session.login("test@example.com", "password").await.unwrap();
        let review = session.submit_review("6", &input).await.unwrap();
        assert_eq!(review.user_name, "Test User");

        let listed = session.api.list_reviews("6").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, review.id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_rejects_malformed_email_before_the_wire() {
        let session = Storefront::in_memory();

        let err = session.login("not-an-email", "password").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // A well-formed but wrong address still goes out and is refused
        let err = session.login("other@example.com", "password").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_restores_from_same_substrate() {
        let store = StoreAdapter::in_memory();

        {
            let session = Storefront::new(store.clone(), ApiConfig::instant());
            let product = session.find_product("nova-4k-monitor").unwrap();
            session.cart.add(&product, 1);
            session.login("test@example.com", "password").await.unwrap();
        }

        // A new session over the same substrate picks up cart and auth
        let session = Storefront::new(store, ApiConfig::instant());
        assert_eq!(session.cart.count(), 1);
        assert!(session.auth.is_authenticated());
        assert_eq!(session.auth.user().unwrap().email, "test@example.com");
    }
}
