//! Short-lived store for checkout snapshots.
//!
//! Snapshots are kept in an in-process TTL cache keyed by their generated
//! id; the session only carries the id. An expired or unknown id simply
//! looks like "no checkout in progress" to the caller.

use std::time::Duration;

use moka::future::Cache;

use sundrop_core::CheckoutId;

use crate::models::CheckoutSnapshot;

/// Upper bound on concurrently held snapshots.
const MAX_SNAPSHOTS: u64 = 10_000;

/// In-process TTL store for checkout snapshots.
#[derive(Clone)]
pub struct CheckoutStore {
    cache: Cache<CheckoutId, CheckoutSnapshot>,
}

impl CheckoutStore {
    /// Create a store whose entries expire after `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(MAX_SNAPSHOTS)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Insert a snapshot under its own id.
    pub async fn put(&self, snapshot: CheckoutSnapshot) {
        self.cache.insert(snapshot.id, snapshot).await;
    }

    /// Fetch a snapshot by id, if it has not expired.
    pub async fn get(&self, id: CheckoutId) -> Option<CheckoutSnapshot> {
        self.cache.get(&id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sundrop_core::{Cart, CurrencyCode, Price, Product, ProductId};

    fn snapshot() -> CheckoutSnapshot {
        let product = Product {
            id: ProductId::new(1),
            name: "Blood Orange Marmalade".to_string(),
            description: String::new(),
            price: Price::from_minor_units(850, CurrencyCode::USD),
            image: String::new(),
        };
        CheckoutSnapshot::from_cart(&Cart::new().add(&product))
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = CheckoutStore::new(Duration::from_secs(60));
        let snapshot = snapshot();
        let id = snapshot.id;

        store.put(snapshot).await;
        let fetched = store.get(id).await.expect("snapshot present");
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.item_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let store = CheckoutStore::new(Duration::from_secs(60));
        assert!(store.get(CheckoutId::generate()).await.is_none());
    }
}
