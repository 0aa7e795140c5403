//! Static product catalog.
//!
//! The catalog is a fixed list built once at startup. There is no inventory
//! or admin surface behind it; products, prices, and images change by
//! editing this module.

use std::sync::LazyLock;

use sundrop_core::{CurrencyCode, Price, Product, ProductId};

static CATALOG: LazyLock<Vec<Product>> = LazyLock::new(|| {
    vec![
        product(
            1,
            "Blood Orange Marmalade",
            "Small-batch marmalade with whole candied peel. Bittersweet, not cloying.",
            850,
            "blood-orange-marmalade",
        ),
        product(
            2,
            "Meyer Lemon Curd",
            "Silky curd made with whole Meyer lemons and cultured butter.",
            925,
            "meyer-lemon-curd",
        ),
        product(
            3,
            "Yuzu Sparkling Tonic",
            "Dry sparkling tonic with fresh-pressed yuzu. 250ml bottle.",
            475,
            "yuzu-sparkling-tonic",
        ),
        product(
            4,
            "Candied Clementine Peel",
            "Slow-candied peel, dusted or dipped in dark chocolate.",
            600,
            "candied-clementine-peel",
        ),
        product(
            5,
            "Grapefruit & Thyme Shrub",
            "Drinking vinegar for spritzes and sodas. 375ml bottle.",
            1250,
            "grapefruit-thyme-shrub",
        ),
        product(
            6,
            "Bergamot Earl Grey Tea",
            "Loose-leaf black tea scented with cold-pressed bergamot oil. 100g tin.",
            1100,
            "bergamot-earl-grey-tea",
        ),
    ]
});

fn product(id: i32, name: &str, description: &str, cents: i64, slug: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price: Price::from_minor_units(cents, CurrencyCode::USD),
        image: format!("/static/images/products/{slug}.jpg"),
    }
}

/// All catalog products, in display order.
#[must_use]
pub fn all() -> &'static [Product] {
    &CATALOG
}

/// Look up a product by id.
#[must_use]
pub fn find(id: ProductId) -> Option<&'static Product> {
    CATALOG.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<_> = all().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn test_find_known_product() {
        let p = find(ProductId::new(1)).expect("product 1 exists");
        assert_eq!(p.name, "Blood Orange Marmalade");
        assert_eq!(p.price.to_string(), "$8.50");
    }

    #[test]
    fn test_find_unknown_product() {
        assert!(find(ProductId::new(999)).is_none());
    }
}
