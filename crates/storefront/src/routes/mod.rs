//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product listing page
//! GET  /health                 - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit (returns cart_count fragment)
//! POST /cart/remove            - Remove a line (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/checkout          - Snapshot the cart, redirect to /checkout
//!
//! # Checkout
//! GET  /checkout               - Checkout form (empty-cart view without state)
//! POST /checkout               - Validate email, create payment session, redirect
//!
//! # Payment outcome
//! GET  /payment-success        - Verify payment via session_id query param
//! GET  /payment-failed         - Failure page; best-effort order marking
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod outcome;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/checkout", post(cart::checkout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product listing
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout form
        .route("/checkout", get(checkout::show).post(checkout::submit))
        // Payment outcome pages
        .route("/payment-success", get(outcome::success))
        .route("/payment-failed", get(outcome::failed))
}
