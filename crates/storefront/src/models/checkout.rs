//! Checkout snapshot model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sundrop_core::{Cart, CartLine, CheckoutId, Price};

/// An immutable copy of the cart, taken when the shopper heads to checkout.
///
/// The snapshot lives in the short-lived checkout store keyed by its
/// generated id; only the id travels in the session. Later cart edits never
/// touch a snapshot, so an in-flight checkout always charges what the
/// shopper saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSnapshot {
    pub id: CheckoutId,
    pub lines: Vec<CartLine>,
    pub total: Price,
    pub created_at: DateTime<Utc>,
}

impl CheckoutSnapshot {
    /// Snapshot the given cart under a fresh id.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            id: CheckoutId::generate(),
            lines: cart.lines().cloned().collect(),
            total: cart.total(),
            created_at: Utc::now(),
        }
    }

    /// Whether the snapshot has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sundrop_core::{CurrencyCode, Product, ProductId};

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_minor_units(cents, CurrencyCode::USD),
            image: String::new(),
        }
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_cart_edits() {
        let p = product(1, 850);
        let cart = Cart::new().add(&p);
        let snapshot = CheckoutSnapshot::from_cart(&cart);

        let _mutated = cart.add(&p).add(&product(2, 925));

        assert_eq!(snapshot.item_count(), 1);
        assert_eq!(snapshot.total.minor_units(), Some(850));
    }

    #[test]
    fn test_empty_cart_snapshot() {
        let snapshot = CheckoutSnapshot::from_cart(&Cart::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.item_count(), 0);
    }
}
