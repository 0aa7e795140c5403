//! Shopping cart model.
//!
//! The cart is an explicit map keyed by product id, and mutations are pure
//! functions of `(cart, input) -> cart`. Handlers read the cart out of the
//! session, apply a mutation, and write the result back; a snapshot taken at
//! checkout time is therefore never affected by later edits.
//!
//! Invariants upheld by construction:
//! - at most one line per product id (it's the map key)
//! - every stored line has quantity >= 1 (zero-quantity lines are removed,
//!   never kept)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price, Product, ProductId};

/// One product's entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image: String,
    /// Always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// An ordered collection of cart lines, keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: BTreeMap<ProductId, CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product` to the cart.
    ///
    /// If a line for the product already exists its quantity is incremented,
    /// otherwise a new line with quantity 1 is inserted. Pure: returns a new
    /// cart, leaving `self` untouched.
    #[must_use]
    pub fn add(&self, product: &Product) -> Self {
        let mut lines = self.lines.clone();
        lines
            .entry(product.id)
            .and_modify(|line| line.quantity += 1)
            .or_insert_with(|| CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                image: product.image.clone(),
                quantity: 1,
            });
        Self { lines }
    }

    /// Remove the whole line for `product_id` (not a decrement).
    ///
    /// No-op if the product is not in the cart. Pure: returns a new cart.
    #[must_use]
    pub fn remove(&self, product_id: ProductId) -> Self {
        let mut lines = self.lines.clone();
        lines.remove(&product_id);
        Self { lines }
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over the cart lines.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// Total number of items: the sum of all line quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.values().map(|line| line.quantity).sum()
    }

    /// Total price: the sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        let currency_code = self
            .lines
            .values()
            .next()
            .map_or_else(CurrencyCode::default, |line| line.unit_price.currency_code);
        let amount = self
            .lines
            .values()
            .map(|line| line.line_total().amount)
            .sum();
        Price::new(amount, currency_code)
    }
}
