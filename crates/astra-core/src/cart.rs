//! # Cart Module
//!
//! Pure cart math: an insertion-ordered collection of [`CartItem`]s with
//! merge-on-add semantics and recomputed derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                Operation              Cart Change            │
//! │  ─────────                ─────────              ───────────            │
//! │                                                                         │
//! │  Click "Add to Cart" ───► add() ───────────────► merge or append        │
//! │                                                                         │
//! │  Change quantity ───────► set_quantity() ──────► overwrite (≤0 removes) │
//! │                                                                         │
//! │  Click remove ──────────► remove() ────────────► retain-filter          │
//! │                                                                         │
//! │  Checkout success ──────► clear() ─────────────► items.clear()          │
//! │                                                                         │
//! │  Totals are derived on every read - never cached, never stale.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CartItem, Product};

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product merges
///   quantities into the existing entry, preserving its position)
/// - Quantity is always > 0 while an item exists (`set_quantity` with
///   zero or a negative value removes the item)
/// - Item order is insertion order (relevant for display)
///
/// This layer enforces no ceiling against `stock_quantity`; quantity
/// clamping is a UI concern applied by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Items in the cart, insertion-ordered.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity += `quantity`, position kept
    /// - Product not in cart: appended as a new item with a frozen price
    pub fn add(&mut self, product: &Product, quantity: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += quantity;
            return;
        }

        self.items.push(CartItem::from_product(product, quantity));
    }

    /// Removes an item from the cart by product id.
    ///
    /// Removing an absent id is a no-op, not an error.
    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Sets the quantity of an item in place.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: equivalent to [`Cart::remove`]
    /// - Otherwise: overwrites the quantity, position kept
    /// - Absent id: no-op
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of unique items in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total quantity across all items. Recomputed on every call.
    pub fn count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Cart total in cents: Σ frozen unit price × quantity.
    ///
    /// Uses the price captured on each [`CartItem`], never a live catalog
    /// lookup. Recomputed on every call - never cached stale.
    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// Cart total as Money.
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Product {
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

    #[test]
    fn test_add_new_item() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 999), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total_cents(), 1998);
    }

    #[test]
    fn test_add_twice_merges_quantities() {
        // For all products P added twice with q1, q2: exactly one entry
        // with quantity q1+q2.
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add(&product, 2);
        cart.add(&product, 3);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
    }

    #[test]
    fn test_merge_preserves_position() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 100), 1);
        cart.add(&test_product("2", 200), 1);
        cart.add(&test_product("1", 100), 4);

        assert_eq!(cart.items[0].product.id, "1");
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.items[1].product.id, "2");
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 100), 1);
        cart.remove("1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 100), 1);
        cart.remove("nope");
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 100), 1);
        cart.set_quantity("1", 7);
        assert_eq!(cart.items[0].quantity, 7);
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        // setQuantity(id, 0) and remove(id) are equivalent
        let mut a = Cart::new();
        let mut b = Cart::new();
        let product = test_product("1", 100);
        a.add(&product, 3);
        b.add(&product, 3);

        a.set_quantity("1", 0);
        b.remove("1");

        assert!(a.is_empty());
        assert!(b.is_empty());
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 100), 3);
        cart.set_quantity("1", -2);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_recomputed_from_frozen_prices() {
        let mut cart = Cart::new();
        let mut product = test_product("1", 24950);
        cart.add(&product, 2);

        // A later catalog price change must not affect the cart total
        product.price_cents = 1;

        assert_eq!(cart.total_cents(), 49900);
        assert_eq!(cart.total(), Money::from_cents(49900));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&test_product("1", 100), 1);
        cart.add(&test_product("2", 200), 2);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total_cents(), 0);
    }
}
