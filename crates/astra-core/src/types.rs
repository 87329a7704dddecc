//! # Domain Types
//!
//! Core domain types used throughout Astra Commerce.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │     Review      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  slug (business)│   │  status         │   │  product_id     │       │
//! │  │  name           │   │  total_cents    │   │  rating (1-5)   │       │
//! │  │  price_cents    │   │  items          │   │  comment        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartItem     │   │   OrderStatus   │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product snap   │   │  Pending        │   │  id             │       │
//! │  │  quantity       │   │  Processing     │   │  email          │       │
//! │  │  added_at       │   │  Shipped        │   │  name           │       │
//! │  └─────────────────┘   │  Delivered      │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Products carry two identifiers:
//! - `id`: stable, unique, used for cart/order/review relations
//! - `slug`: human-readable business key, used for catalog lookup

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Catalog data is immutable and read-only from the core's perspective;
/// carts and orders snapshot what they need from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (stable, used for relations).
    pub id: String,

    /// Human-readable business key, unique across the catalog.
    pub slug: String,

    /// Display name.
    pub name: String,

    /// Marketing description.
    pub description: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Units currently in stock. Display-level concern: the cart layer
    /// does not enforce a quantity ceiling against this value.
    pub stock_quantity: u32,

    /// Category label ("Laptops", "Audio", ...).
    pub category: String,

    /// Image URI.
    pub image: String,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether any units are in stock.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the shopping cart.
///
/// ## Design Notes
/// Uses the snapshot pattern: the full product is frozen at the moment of
/// adding. The cart displays consistent data (and `total` uses a stable
/// price) even if the catalog changes afterwards, and checkout can
/// snapshot the same product into an [`OrderItem`] without a catalog
/// lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Product snapshot at time of adding (frozen).
    /// The price on this snapshot is critical: totals use it, never a
    /// live catalog lookup.
    pub product: Product,

    /// Quantity in cart. Invariant: always > 0 while the item exists.
    pub quantity: i64,

    /// When this item was added to cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart item from a product and quantity.
    ///
    /// ## Price Freezing
    /// The product (price included) is captured at this moment. If the
    /// catalog changes later, this cart item retains the original data.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product: product.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    /// The id of the snapshotted product.
    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Unit price in cents at time of adding (frozen).
    #[inline]
    pub fn unit_price_cents(&self) -> i64 {
        self.product.price_cents
    }

    /// Calculates the line total (unit price × quantity) in cents.
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents() * self.quantity
    }

    /// Line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }
}

// =============================================================================
// User
// =============================================================================

/// An authenticated user.
///
/// Opaque to the core beyond identity; created on successful login,
/// destroyed on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// Transitions are monotonic and forward-only:
/// `Pending → Processing → Shipped → Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order created at checkout, awaiting confirmation.
    Pending,
    /// Confirmation event received (simulated payment webhook).
    Processing,
    /// Order handed to the carrier.
    Shipped,
    /// Order arrived.
    Delivered,
}

impl OrderStatus {
    /// Returns the next status in the forward-only progression,
    /// or `None` when the status is terminal.
    pub const fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// Checks that `target` is strictly ahead of `self` in the
    /// progression. Backward transitions are never allowed.
    pub fn can_advance_to(self, target: OrderStatus) -> bool {
        target > self
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Order
// =============================================================================

/// An immutable record of a checked-out cart.
///
/// Created atomically from a non-empty cart at checkout; the status field
/// is the only part that mutates afterwards (forward-only), and orders
/// are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Generated unique id (`ORD-...`).
    pub id: String,

    /// Current status; see [`OrderStatus`] for the progression.
    pub status: OrderStatus,

    /// Sum of line extensions at creation time, in cents.
    pub total_cents: i64,

    /// Shipping destination captured at checkout.
    pub shipping_address: String,

    /// When the order was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Ordered line items (cart order preserved).
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
/// Uses the snapshot pattern to freeze product data at time of checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    /// Unique within the order.
    pub id: String,

    /// Full product snapshot at time of checkout.
    pub product: Product,

    /// Quantity purchased.
    pub quantity: i64,

    /// Price in cents at the moment of checkout (frozen).
    /// Decouples historical orders from future catalog price changes.
    pub price_at_purchase_cents: i64,
}

impl OrderItem {
    /// Returns the frozen purchase price as Money.
    #[inline]
    pub fn price_at_purchase(&self) -> Money {
        Money::from_cents(self.price_at_purchase_cents)
    }

    /// Line extension (purchase price × quantity) as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.price_at_purchase_cents * self.quantity)
    }
}

// =============================================================================
// Review
// =============================================================================

/// A product review.
///
/// Append-only from the client's perspective: created by submission,
/// never mutated or deleted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Review {
    /// Unique identifier.
    pub id: String,

    /// The reviewed product. No referential-integrity enforcement.
    pub product_id: String,

    /// The author's user id.
    pub user_id: String,

    /// Denormalized snapshot of the author's display name at submission
    /// time. A later name change does not retroactively update reviews.
    pub user_name: String,

    /// Star rating, 1-5 inclusive.
    pub rating: u8,

    /// Review body. Non-empty.
    pub comment: String,

    /// When the review was submitted.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "3".to_string(),
            slug: "aether-wireless-headphones".to_string(),
            name: "Aether Wireless Headphones".to_string(),
            description: "Crystal clear audio.".to_string(),
            price_cents: 24950,
            stock_quantity: 50,
            category: "Audio".to_string(),
            image: "https://picsum.photos/seed/headphones/600/400".to_string(),
        }
    }

    #[test]
    fn test_product_helpers() {
        let p = product();
        assert_eq!(p.price(), Money::from_cents(24950));
        assert!(p.in_stock());

        let mut out = p.clone();
        out.stock_quantity = 0;
        assert!(!out.in_stock());
    }

    #[test]
    fn test_cart_item_freezes_price() {
        let mut p = product();
        let item = CartItem::from_product(&p, 2);

        // Catalog price change after the fact must not affect the item
        p.price_cents = 99999;

        assert_eq!(item.unit_price_cents(), 24950);
        assert_eq!(item.line_total_cents(), 49900);
    }

    #[test]
    fn test_order_status_progression() {
        assert_eq!(OrderStatus::Pending.next(), Some(OrderStatus::Processing));
        assert_eq!(OrderStatus::Processing.next(), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::Shipped.next(), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::Delivered.next(), None);
    }

    #[test]
    fn test_order_status_monotonic() {
        assert!(OrderStatus::Pending.can_advance_to(OrderStatus::Processing));
        assert!(OrderStatus::Pending.can_advance_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Processing.can_advance_to(OrderStatus::Pending));
        assert!(!OrderStatus::Shipped.can_advance_to(OrderStatus::Shipped));
    }

    #[test]
    fn test_order_status_serde_tags() {
        // Wire format is SCREAMING_SNAKE_CASE, matching the frontend enum
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
        let back: OrderStatus = serde_json::from_str("\"PROCESSING\"").unwrap();
        assert_eq!(back, OrderStatus::Processing);
    }

    #[test]
    fn test_order_item_line_total() {
        let item = OrderItem {
            id: "ITEM-1".to_string(),
            product: product(),
            quantity: 2,
            price_at_purchase_cents: 24950,
        };
        assert_eq!(item.line_total().cents(), 49900);
    }
}
