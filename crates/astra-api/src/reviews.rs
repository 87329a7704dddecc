//! # Review Store
//!
//! Persisted, append-only product reviews.
//!
//! ## Review Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Review Store                                         │
//! │                                                                         │
//! │  submit(product_id, rating, comment, user)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Review { fresh id, now, user_name ← user.name (denormalized) }         │
//! │       │                                                                 │
//! │       ├──► append to in-memory collection (append-only: no edit or      │
//! │       │    delete operation exists)                                     │
//! │       ├──► persist the FULL collection under keys::REVIEWS              │
//! │       └──► return the new review (caller can prepend it to its own      │
//! │            list without a re-fetch)                                     │
//! │                                                                         │
//! │  list(product_id) ──► filter to product, newest-first                   │
//! │                                                                         │
//! │  NOTE: this store accepts whatever is handed to it. Rating/comment      │
//! │  validation is the CALLER's required contract (see MockApi).            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use astra_core::{Review, User};
use astra_store::{keys, StoreAdapter};

/// The session's persisted review collection.
///
/// An explicit store object, injected where needed - never a
/// process-wide static. Each test builds a fresh one over its own
/// adapter.
#[derive(Debug)]
pub struct ReviewStore {
    reviews: Arc<Mutex<Vec<Review>>>,
    store: StoreAdapter,
}

impl ReviewStore {
    /// Creates a review store restored from durable storage.
    ///
    /// A missing or corrupt persisted collection yields an empty one;
    /// the adapter removes corrupt entries on the way through.
    pub fn load(store: StoreAdapter) -> Self {
        let reviews: Vec<Review> = store.load(keys::REVIEWS).unwrap_or_default();
        if !reviews.is_empty() {
            debug!(count = reviews.len(), "Reviews restored from storage");
        }
        ReviewStore {
            reviews: Arc::new(Mutex::new(reviews)),
            store,
        }
    }

    /// Returns the reviews for one product, newest first.
    pub fn list(&self, product_id: &str) -> Vec<Review> {
        let reviews = self.reviews.lock().unwrap_or_else(|e| e.into_inner());
        let mut matching: Vec<Review> = reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
    }

    /// Appends a new review and persists the full collection.
    ///
    /// `user_name` is denormalized from `user` at this moment: a later
    /// name change does not retroactively update past reviews. Input is
    /// taken as given - the required validation contract lives with the
    /// caller.
    pub fn submit(&self, product_id: &str, rating: u8, comment: &str, user: &User) -> Review {
        let review = Review {
            id: format!("REV-{}", Uuid::new_v4()),
            product_id: product_id.to_string(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            rating,
            comment: comment.to_string(),
            created_at: Utc::now(),
        };

        {
            let mut reviews = self.reviews.lock().unwrap_or_else(|e| e.into_inner());
            reviews.push(review.clone());
            self.store.save(keys::REVIEWS, &*reviews);
        }

        info!(
            review_id = %review.id,
            product_id,
            rating,
            "Review submitted"
        );

        review
    }

    /// Total number of stored reviews across all products.
    pub fn len(&self) -> usize {
        let reviews = self.reviews.lock().unwrap_or_else(|e| e.into_inner());
        reviews.len()
    }

    /// Checks whether no reviews are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            id: "user-1".to_string(),
            email: "test@example.com".to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_submit_and_list() {
        let store = ReviewStore::load(StoreAdapter::in_memory());

        let review = store.submit("3", 5, "Superb noise cancellation.", &user("Test User"));
        assert_eq!(review.rating, 5);
        assert_eq!(review.user_name, "Test User");

        let listed = store.list("3");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, review.id);
    }

    #[test]
    fn test_list_filters_by_product() {
        let store = ReviewStore::load(StoreAdapter::in_memory());
        store.submit("3", 4, "Good.", &user("A"));
        store.submit("5", 2, "Meh.", &user("B"));
        store.submit("3", 5, "Great.", &user("C"));

        let listed = store.list("3");
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|r| r.product_id == "3"));
        assert!(store.list("no-such-product").is_empty());
    }

    #[test]
    fn test_list_newest_first() {
        let store = ReviewStore::load(StoreAdapter::in_memory());
        let first = store.submit("3", 3, "First impressions.", &user("A"));
        let second = store.submit("3", 4, "A week in.", &user("A"));

        let listed = store.list("3");
        assert_eq!(listed.len(), 2);
        assert!(listed[0].created_at >= listed[1].created_at);
        if second.created_at > first.created_at {
            assert_eq!(listed[0].id, second.id);
        }
    }

    #[test]
    fn test_user_name_denormalized_at_submission() {
        let store = ReviewStore::load(StoreAdapter::in_memory());
        let review = store.submit("3", 5, "Love it.", &user("Old Name"));

        // The author "renames" afterwards; the review keeps the snapshot
        let _renamed = user("New Name");
        assert_eq!(store.list("3")[0].user_name, "Old Name");
        assert_eq!(review.user_name, "Old Name");
    }

    #[test]
    fn test_persists_across_reloads() {
        let adapter = StoreAdapter::in_memory();
        {
            let store = ReviewStore::load(adapter.clone());
            store.submit("3", 5, "Persisted.", &user("A"));
        }

        let store = ReviewStore::load(adapter);
        assert_eq!(store.len(), 1);
        assert_eq!(store.list("3")[0].comment, "Persisted.");
    }

    #[test]
    fn test_corrupt_persisted_reviews_yield_empty() {
        let adapter = StoreAdapter::in_memory();
        adapter.set_raw(keys::REVIEWS, "[{\"id\": 12}]");

        let store = ReviewStore::load(adapter.clone());
        assert!(store.is_empty());

        // The corrupt entry is gone; new submissions persist cleanly
        assert_eq!(adapter.raw(keys::REVIEWS), None);
        store.submit("3", 4, "Fresh start.", &user("A"));
        assert!(adapter.raw(keys::REVIEWS).is_some());
    }
}
