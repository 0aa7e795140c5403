//! Session-related types.
//!
//! Keys for the per-visitor data held in the cookie session.

/// Session keys for storefront data.
pub mod keys {
    /// Key for storing the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for storing the current checkout snapshot id.
    pub const CHECKOUT_ID: &str = "checkout_id";
}
