//! # Order Book / Checkout Simulator
//!
//! Converts carts into immutable order records and simulates the
//! out-of-band confirmation event that advances a fresh order from
//! PENDING to PROCESSING.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout & Confirmation                              │
//! │                                                                         │
//! │  checkout(items, token)                                                 │
//! │       │                                                                 │
//! │       ├── token absent? ──────► AuthenticationRequired                  │
//! │       ├── cart empty? ────────► EmptyCart                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Build Order: total = Σ price×qty, items snapshotted with               │
//! │  price_at_purchase, status = PENDING, fresh id + timestamp              │
//! │       │                                                                 │
//! │       ├──► insert at HEAD of order list (most-recent-first is an        │
//! │       │    invariant of the list, not a sort applied at read time)      │
//! │       │                                                                 │
//! │       └──► register one-shot task keyed by order id:                    │
//! │              sleep(confirm_delay)                                       │
//! │              find order BY ID (the list may have grown)                 │
//! │              PENDING ──► PROCESSING (exactly once)                      │
//! │              deregister self                                            │
//! │                                                                         │
//! │  cancel_pending(id) aborts + deregisters the task - cancellation and    │
//! │  idempotency are structural properties of the registry.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use astra_core::{CartItem, CoreError, CoreResult, Order, OrderItem, OrderStatus};

/// The session's order list and confirmation-task registry.
///
/// An explicit store object: constructed per session context and
/// injected into whatever needs it, never a process-wide static. Each
/// test gets a fresh one.
///
/// ## Thread Safety
/// Orders live behind `Arc<Mutex<Vec<Order>>>`. The confirmation task and
/// API calls run on the same runtime; the lock is held only for short
/// synchronous sections, so a reader observes either PENDING or
/// PROCESSING, never a torn intermediate state.
#[derive(Debug)]
pub struct OrderBook {
    orders: Arc<Mutex<Vec<Order>>>,
    /// Pending confirmation tasks, keyed by order id.
    pending: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
    confirm_delay: Duration,
    shipping_address: String,
}

impl OrderBook {
    /// Creates an empty order book.
    ///
    /// ## Arguments
    /// * `confirm_delay` - how long after checkout the simulated
    ///   confirmation event fires
    /// * `shipping_address` - destination stamped on every order
    pub fn new(confirm_delay: Duration, shipping_address: impl Into<String>) -> Self {
        OrderBook {
            orders: Arc::new(Mutex::new(Vec::new())),
            pending: Arc::new(Mutex::new(HashMap::new())),
            confirm_delay,
            shipping_address: shipping_address.into(),
        }
    }

    /// Converts a cart snapshot into a new PENDING order.
    ///
    /// ## Preconditions (checked in order)
    /// 1. `token` must be present, else `AuthenticationRequired`
    /// 2. `items` must be non-empty, else `EmptyCart`
    ///
    /// On failure no order is created and nothing is scheduled.
    ///
    /// ## Price Snapshotting
    /// `price_at_purchase` is copied from the cart entry at this moment
    /// and never re-read from the catalog - historical orders are
    /// decoupled from future price changes.
    ///
    /// Must be called from within a tokio runtime (the confirmation task
    /// is spawned onto it).
    pub fn checkout(&self, items: &[CartItem], token: Option<&str>) -> CoreResult<Order> {
        if token.is_none() {
            return Err(CoreError::AuthenticationRequired);
        }
        if items.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let total_cents: i64 = items.iter().map(|i| i.line_total_cents()).sum();
        let order = Order {
            id: format!("ORD-{}", Uuid::new_v4()),
            status: OrderStatus::Pending,
            total_cents,
            shipping_address: self.shipping_address.clone(),
            created_at: Utc::now(),
            items: items
                .iter()
                .map(|item| OrderItem {
                    id: format!("ITEM-{}", Uuid::new_v4()),
                    product: item.product.clone(),
                    quantity: item.quantity,
                    price_at_purchase_cents: item.unit_price_cents(),
                })
                .collect(),
        };

        {
            let mut orders = self.orders.lock().unwrap_or_else(|e| e.into_inner());
            // Head insertion keeps the listing most-recent-first without
            // ever sorting by timestamp (clock skew cannot reorder it).
            orders.insert(0, order.clone());
        }

        info!(
            order_id = %order.id,
            total = %order.total(),
            items = order.items.len(),
            "Order created"
        );

        self.schedule_confirmation(order.id.clone());

        Ok(order)
    }

    /// Returns all orders, most-recent-first.
    ///
    /// Fails with `AuthenticationRequired` when `token` is absent.
    pub fn fetch_orders(&self, token: Option<&str>) -> CoreResult<Vec<Order>> {
        if token.is_none() {
            return Err(CoreError::AuthenticationRequired);
        }

        let orders = self.orders.lock().unwrap_or_else(|e| e.into_inner());
        Ok(orders.clone())
    }

    /// Looks up a single order by id.
    pub fn find(&self, order_id: &str) -> Option<Order> {
        let orders = self.orders.lock().unwrap_or_else(|e| e.into_inner());
        orders.iter().find(|o| o.id == order_id).cloned()
    }

    /// Aborts and deregisters the confirmation task for `order_id`.
    ///
    /// Returns `true` when a task was pending. The order itself is left
    /// untouched (it simply stays PENDING).
    pub fn cancel_pending(&self, order_id: &str) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        match pending.remove(order_id) {
            Some(handle) => {
                handle.abort();
                debug!(order_id, "Confirmation task cancelled");
                true
            }
            None => false,
        }
    }

    /// Number of confirmation tasks still pending. Mainly for tests.
    pub fn pending_count(&self) -> usize {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.len()
    }

    /// Registers the one-shot PENDING → PROCESSING transition for a
    /// fresh order.
    ///
    /// The task locates its target by id, not by position: other orders
    /// may be created (head-inserted!) before the timer fires. The
    /// transition is guarded by `can_advance_to`, so firing against an
    /// order that somehow moved on is a no-op.
    fn schedule_confirmation(&self, order_id: String) {
        let orders = Arc::clone(&self.orders);
        let registry = Arc::clone(&self.pending);
        let delay = self.confirm_delay;
        let task_id = order_id.clone();

        // Hold the registry lock across spawn + insert so a zero-delay
        // task cannot try to deregister itself before it is registered.
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            {
                let mut orders = orders.lock().unwrap_or_else(|e| e.into_inner());
                if let Some(order) = orders.iter_mut().find(|o| o.id == task_id) {
                    if order.status.can_advance_to(OrderStatus::Processing) {
                        order.status = OrderStatus::Processing;
                        info!(order_id = %task_id, "Order confirmed (PENDING → PROCESSING)");
                    }
                }
            }

            let mut registry = registry.lock().unwrap_or_else(|e| e.into_inner());
            registry.remove(&task_id);
        });
        pending.insert(order_id, handle);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use astra_core::Product;

    const DELAY: Duration = Duration::from_millis(2000);
    const ADDRESS: &str = "123 Quantum Way, Cybertown, 98765";
    const TOKEN: Option<&str> = Some("mock-jwt-token-string");

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            slug: format!("product-{}", id),
            name: format!("Product {}", id),
            description: "A test product".to_string(),
            price_cents,
            stock_quantity: 10,
            category: "Test".to_string(),
            image: format!("https://picsum.photos/seed/{}/600/400", id),
        }
    }

    fn cart_items(entries: &[(&str, i64, i64)]) -> Vec<CartItem> {
        entries
            .iter()
            .map(|(id, price, qty)| CartItem::from_product(&product(id, *price), *qty))
            .collect()
    }

    /// Lets pending timers fire and spawned tasks run (paused clock).
    async fn run_past_delay() {
        tokio::time::sleep(DELAY + Duration::from_millis(10)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkout_requires_token() {
        let book = OrderBook::new(DELAY, ADDRESS);
        let items = cart_items(&[("1", 100, 1)]);

        let err = book.checkout(&items, None).unwrap_err();
        assert_eq!(err, CoreError::AuthenticationRequired);

        // No order was created, nothing scheduled
        assert!(book.fetch_orders(TOKEN).unwrap().is_empty());
        assert_eq!(book.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkout_rejects_empty_cart() {
        let book = OrderBook::new(DELAY, ADDRESS);

        let err = book.checkout(&[], TOKEN).unwrap_err();
        assert_eq!(err, CoreError::EmptyCart);
        assert!(book.fetch_orders(TOKEN).unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_precondition_order_token_before_cart() {
        // A logged-out user with an empty cart sees the auth error
        let book = OrderBook::new(DELAY, ADDRESS);
        let err = book.checkout(&[], None).unwrap_err();
        assert_eq!(err, CoreError::AuthenticationRequired);
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkout_snapshots_total_and_prices() {
        let book = OrderBook::new(DELAY, ADDRESS);
        let items = cart_items(&[("3", 24950, 2), ("4", 19999, 1)]);

        let order = book.checkout(&items, TOKEN).unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_cents, 24950 * 2 + 19999);
        assert_eq!(order.shipping_address, ADDRESS);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].price_at_purchase_cents, 24950);
        assert_eq!(order.items[0].quantity, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_orders_most_recent_first() {
        let book = OrderBook::new(DELAY, ADDRESS);

        let first = book.checkout(&cart_items(&[("1", 100, 1)]), TOKEN).unwrap();
        let second = book.checkout(&cart_items(&[("2", 200, 1)]), TOKEN).unwrap();
        let third = book.checkout(&cart_items(&[("3", 300, 1)]), TOKEN).unwrap();

        let orders = book.fetch_orders(TOKEN).unwrap();
        let ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec![third.id.as_str(), second.id.as_str(), first.id.as_str()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_orders_requires_token() {
        let book = OrderBook::new(DELAY, ADDRESS);
        let err = book.fetch_orders(None).unwrap_err();
        assert_eq!(err, CoreError::AuthenticationRequired);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_transition_fires_once_for_one_order() {
        let book = OrderBook::new(DELAY, ADDRESS);

        let early = book.checkout(&cart_items(&[("1", 100, 1)]), TOKEN).unwrap();

        // Let the first order confirm, then create a second
        run_past_delay().await;
        let late = book.checkout(&cart_items(&[("2", 200, 1)]), TOKEN).unwrap();

        assert_eq!(book.find(&early.id).unwrap().status, OrderStatus::Processing);
        assert_eq!(book.find(&late.id).unwrap().status, OrderStatus::Pending);

        run_past_delay().await;
        assert_eq!(book.find(&late.id).unwrap().status, OrderStatus::Processing);
        assert_eq!(book.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_finds_order_by_id_after_head_insertions() {
        let book = OrderBook::new(DELAY, ADDRESS);

        // The target order gets pushed down the list by later checkouts
        let target = book.checkout(&cart_items(&[("1", 100, 1)]), TOKEN).unwrap();
        tokio::time::advance(Duration::from_millis(50)).await;
        book.checkout(&cart_items(&[("2", 200, 1)]), TOKEN).unwrap();
        book.checkout(&cart_items(&[("3", 300, 1)]), TOKEN).unwrap();

        run_past_delay().await;

        // Position 2, not position 0 - found by id, all orders confirmed
        let orders = book.fetch_orders(TOKEN).unwrap();
        assert_eq!(orders[2].id, target.id);
        assert!(orders.iter().all(|o| o.status == OrderStatus::Processing));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending_keeps_order_pending() {
        let book = OrderBook::new(DELAY, ADDRESS);
        let order = book.checkout(&cart_items(&[("1", 100, 1)]), TOKEN).unwrap();

        assert!(book.cancel_pending(&order.id));
        assert_eq!(book.pending_count(), 0);

        run_past_delay().await;
        assert_eq!(book.find(&order.id).unwrap().status, OrderStatus::Pending);

        // Cancelling twice reports nothing pending
        assert!(!book.cancel_pending(&order.id));
    }
}
