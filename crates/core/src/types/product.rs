//! Catalog product type.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product as listed in the static catalog.
///
/// Immutable: catalog entries are built once at startup and only ever read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Path to the product image, relative to the static asset mount.
    pub image: String,
}
