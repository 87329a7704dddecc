//! # Catalog Provider
//!
//! Read-only product catalog with a curated featured subset.
//!
//! ## Catalog Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Provider                                     │
//! │                                                                         │
//! │  list()       ──► all products, fixed stable order (ids 1..6)          │
//! │                                                                         │
//! │  featured()   ──► curated subset, DISPLAY order - independent of       │
//! │                   list() order (drives the home-page carousel)          │
//! │                                                                         │
//! │  find(slug)   ──► Product | None                                        │
//! │                                                                         │
//! │  Pure/read-only; no error conditions beyond "not found".                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use astra_core::Product;

/// The read-only product catalog.
///
/// Catalog data is immutable for the lifetime of a session; carts and
/// orders snapshot what they need from it.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    /// Featured slugs in display order.
    featured: Vec<String>,
}

impl Catalog {
    /// Creates a catalog from explicit products and a featured slug list.
    ///
    /// `featured` is kept as given: its order is the display order and is
    /// independent of the product list's order.
    pub fn new(products: Vec<Product>, featured: Vec<String>) -> Self {
        Catalog { products, featured }
    }

    /// The built-in demo catalog: six products, three featured.
    pub fn demo() -> Self {
        Catalog::new(
            demo_products(),
            vec![
                "nebula-smartphone".to_string(),
                "quantum-core-laptop".to_string(),
                "chronos-smartwatch".to_string(),
            ],
        )
    }

    /// Returns all products in fixed, stable order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Returns the curated featured subset, in display order.
    pub fn featured(&self) -> Vec<Product> {
        self.featured
            .iter()
            .filter_map(|slug| self.find(slug).cloned())
            .collect()
    }

    /// Looks up a product by its slug.
    pub fn find(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Looks up a product by its id.
    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// The six demo products.
fn demo_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            slug: "quantum-core-laptop".to_string(),
            name: "Quantum Core Laptop".to_string(),
            description: "The future of computing in your hands. Features a 16-core \
                          processor, 32GB RAM, and a stunning 4K display."
                .to_string(),
            price_cents: 149_999,
            stock_quantity: 15,
            category: "Laptops".to_string(),
            image: "https://picsum.photos/seed/laptop/600/400".to_string(),
        },
        Product {
            id: "2".to_string(),
            slug: "nebula-smartphone".to_string(),
            name: "Nebula Smartphone".to_string(),
            description: "A stellar camera and an all-day battery life make this the \
                          only phone you'll ever need."
                .to_string(),
            price_cents: 89_900,
            stock_quantity: 30,
            category: "Smartphones".to_string(),
            image: "https://picsum.photos/seed/phone/600/400".to_string(),
        },
        Product {
            id: "3".to_string(),
            slug: "aether-wireless-headphones".to_string(),
            name: "Aether Wireless Headphones".to_string(),
            description: "Crystal clear audio with industry-leading noise cancellation. \
                          Immerse yourself in sound."
                .to_string(),
            price_cents: 24_950,
            stock_quantity: 50,
            category: "Audio".to_string(),
            image: "https://picsum.photos/seed/headphones/600/400".to_string(),
        },
        Product {
            id: "4".to_string(),
            slug: "chronos-smartwatch".to_string(),
            name: "Chronos Smartwatch".to_string(),
            description: "Track your fitness, manage notifications, and stay connected. \
                          All from your wrist."
                .to_string(),
            price_cents: 19_999,
            stock_quantity: 42,
            category: "Wearables".to_string(),
            image: "https://picsum.photos/seed/watch/600/400".to_string(),
        },
        Product {
            id: "5".to_string(),
            slug: "nova-4k-monitor".to_string(),
            name: "Nova 4K Monitor".to_string(),
            description: "Experience breathtaking clarity and color accuracy with this \
                          27-inch professional monitor."
                .to_string(),
            price_cents: 65_000,
            stock_quantity: 22,
            category: "Monitors".to_string(),
            image: "https://picsum.photos/seed/monitor/600/400".to_string(),
        },
        Product {
            id: "6".to_string(),
            slug: "ergoflow-mechanical-keyboard".to_string(),
            name: "ErgoFlow Mechanical Keyboard".to_string(),
            description: "Type faster and more comfortably with responsive tactile \
                          switches and customizable backlighting."
                .to_string(),
            price_cents: 12_999,
            stock_quantity: 60,
            category: "Peripherals".to_string(),
            image: "https://picsum.photos/seed/keyboard/600/400".to_string(),
        },
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_is_stable() {
        let catalog = Catalog::demo();
        let ids: Vec<&str> = catalog.list().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_find_by_slug() {
        let catalog = Catalog::demo();

        let product = catalog.find("aether-wireless-headphones").unwrap();
        assert_eq!(product.name, "Aether Wireless Headphones");
        assert_eq!(product.price_cents, 24950);

        assert!(catalog.find("no-such-slug").is_none());
    }

    #[test]
    fn test_featured_is_display_ordered_subset() {
        let catalog = Catalog::demo();
        let featured = catalog.featured();

        // Display order differs from list() order on purpose
        let slugs: Vec<&str> = featured.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec!["nebula-smartphone", "quantum-core-laptop", "chronos-smartwatch"]
        );

        // Every featured product is in the full listing
        for product in &featured {
            assert!(catalog.find(&product.slug).is_some());
        }
    }

    #[test]
    fn test_unknown_featured_slug_is_skipped() {
        let catalog = Catalog::new(demo_products(), vec!["ghost-product".to_string()]);
        assert!(catalog.featured().is_empty());
    }
}
