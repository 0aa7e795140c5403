//! Catalog page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use sundrop_core::Product;

use crate::catalog;
use crate::filters;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
}

/// Display the product listing page.
#[instrument]
pub async fn home() -> impl IntoResponse {
    HomeTemplate {
        products: catalog::all().iter().map(ProductView::from).collect(),
    }
}
