//! # Cart State
//!
//! Manages the session's shopping cart and mirrors it to durable storage.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple callers may access/modify the cart
//! 2. Only one caller should modify the cart at a time
//! 3. The confirmation timer and RPC calls run on the same runtime
//!
//! ## Persistence Mirror
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action              Operation              Side Effect              │
//! │  ─────────              ─────────              ───────────              │
//! │                                                                         │
//! │  Click product ────────► add() ──────────────► persist full cart       │
//! │                                                                         │
//! │  Change quantity ──────► set_quantity() ─────► persist full cart       │
//! │                                                                         │
//! │  Click remove ─────────► remove() ───────────► persist full cart       │
//! │                                                                         │
//! │  Clear / checkout ─────► clear() ────────────► persist full cart       │
//! │                                                                         │
//! │  Every mutation synchronously mirrors the whole cart under keys::CART. │
//! │  The mirror is fire-and-forget: a persistence failure is WARN-logged   │
//! │  by the adapter and never fails the mutation.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use astra_core::validation::validate_quantity;
use astra_core::{Cart, CartItem, Product};
use astra_store::{keys, StoreAdapter};

/// Session-scoped cart state.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Cart>>`:
/// - `Arc`: Allows shared ownership across tasks
/// - `Mutex`: Ensures only one task modifies the cart at a time
///
/// ## Why Not RwLock?
/// Cart operations are quick and most operations modify state.
/// A RwLock would add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
    store: StoreAdapter,
}

impl CartState {
    /// Creates cart state restored from durable storage.
    ///
    /// A missing or corrupt persisted cart yields an empty cart; the
    /// adapter removes corrupt entries on the way through.
    pub fn load(store: StoreAdapter) -> Self {
        let cart: Cart = store.load(keys::CART).unwrap_or_default();
        if !cart.is_empty() {
            info!(items = cart.len(), "Cart restored from storage");
        }
        CartState {
            cart: Arc::new(Mutex::new(cart)),
            store,
        }
    }

    /// Adds a product (merging quantities if already present) and
    /// mirrors the cart.
    ///
    /// The UI only ever supplies positive quantities; a non-positive one
    /// is refused here so the "quantity > 0" cart invariant cannot be
    /// broken by a buggy caller.
    pub fn add(&self, product: &Product, quantity: i64) {
        if let Err(e) = validate_quantity(quantity) {
            warn!(product_id = %product.id, quantity, error = %e, "Refusing cart add");
            return;
        }
        debug!(product_id = %product.id, quantity, "cart add");
        self.with_cart_mut(|c| c.add(product, quantity));
    }

    /// Removes an item by product id and mirrors the cart. No-op when
    /// the id is absent.
    pub fn remove(&self, product_id: &str) {
        debug!(product_id, "cart remove");
        self.with_cart_mut(|c| c.remove(product_id));
    }

    /// Sets an item's quantity (≤ 0 removes) and mirrors the cart.
    pub fn set_quantity(&self, product_id: &str, quantity: i64) {
        debug!(product_id, quantity, "cart set_quantity");
        self.with_cart_mut(|c| c.set_quantity(product_id, quantity));
    }

    /// Empties the cart and mirrors the (now empty) cart.
    pub fn clear(&self) {
        debug!("cart clear");
        self.with_cart_mut(|c| c.clear());
    }

    /// Returns a snapshot of the current items.
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.with_cart(|c| c.items.clone())
    }

    /// Total quantity across all items. Recomputed on every read.
    pub fn count(&self) -> i64 {
        self.with_cart(|c| c.count())
    }

    /// Cart total in cents. Recomputed on every read from the frozen
    /// per-item prices.
    pub fn total_cents(&self) -> i64 {
        self.with_cart(|c| c.total_cents())
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.with_cart(|c| c.is_empty())
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(|e| e.into_inner());
        f(&cart)
    }

    /// Executes a function with write access, then mirrors the full cart
    /// to durable storage before releasing the lock.
    fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(|e| e.into_inner());
        let result = f(&mut cart);
        self.store.save(keys::CART, &*cart);
        result
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
