//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the cookie session; mutations go through the
//! pure cart model and write the result back.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use sundrop_core::{Cart, CartLine, ProductId};

use crate::catalog;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{CheckoutSnapshot, session::keys};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().map(CartItemView::from).collect(),
            subtotal: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.as_i32(),
            name: line.name.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            price: line.unit_price.to_string(),
            line_price: line.line_total().to_string(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the cart from the session, defaulting to an empty one.
async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Write the cart back to the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CartShowTemplate {
        cart: CartView::from(&cart),
    })
}

/// Add one unit of a product to the cart (HTMX).
///
/// Looks the product up in the catalog first; the cart model itself does not
/// validate membership. Returns the count badge with an HTMX trigger so
/// other cart elements refresh.
#[instrument(skip(session))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Result<Response> {
    let product_id = ProductId::from(form.product_id);
    let Some(product) = catalog::find(product_id) else {
        return Err(AppError::NotFound(format!("product {product_id}")));
    };

    let cart = load_cart(&session).await?.add(product);
    save_cart(&session, &cart).await?;

    tracing::debug!(product = %product.name, count = cart.item_count(), "added to cart");

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response())
}

/// Remove a line from the cart (HTMX).
///
/// Removes the whole line, not a single unit. Unknown ids are a no-op.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Response> {
    let cart = load_cart(&session)
        .await?
        .remove(ProductId::from(form.product_id));
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}

/// Begin checkout: snapshot the cart and move to the checkout form.
///
/// The snapshot is copied by value into the checkout store; later cart edits
/// do not affect it. An empty cart skips the snapshot so the checkout page
/// shows its empty-cart view.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = load_cart(&session).await?;

    if !cart.is_empty() {
        let snapshot = CheckoutSnapshot::from_cart(&cart);
        session.insert(keys::CHECKOUT_ID, snapshot.id).await?;
        state.checkouts().put(snapshot).await;
    }

    Ok(Redirect::to("/checkout").into_response())
}
