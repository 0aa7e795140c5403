//! Checkout form route handlers.
//!
//! Gate progression into payment on a non-empty checkout snapshot and a
//! valid email, then hand control to the collaborator's hosted payment page.
//! Every exit from `submit` is either a full-navigation redirect or a fresh
//! render of the form; there is no loading state to reset server-side.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use sundrop_core::{CheckoutId, Email, EmailError};

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{CheckoutSnapshot, session::keys};
use crate::services::{CheckoutRequest, LineItemInput};
use crate::state::AppState;

/// Checkout line display data for templates.
#[derive(Clone)]
pub struct CheckoutItemView {
    pub name: String,
    pub quantity: u32,
    pub line_price: String,
}

/// Checkout summary display data for templates.
#[derive(Clone)]
pub struct CheckoutView {
    pub items: Vec<CheckoutItemView>,
    pub total: String,
}

impl From<&CheckoutSnapshot> for CheckoutView {
    fn from(snapshot: &CheckoutSnapshot) -> Self {
        Self {
            items: snapshot
                .lines
                .iter()
                .map(|line| CheckoutItemView {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    line_price: line.line_total().to_string(),
                })
                .collect(),
            total: snapshot.total.to_string(),
        }
    }
}

/// Checkout form template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/form.html")]
pub struct CheckoutFormTemplate {
    pub checkout: CheckoutView,
    pub email: String,
    pub email_error: Option<String>,
    pub banner_error: Option<String>,
}

/// Empty-cart view shown when there is nothing to check out.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/empty.html")]
pub struct EmptyCartTemplate;

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub email: String,
}

/// Fetch the current checkout snapshot, if the session points at a live,
/// non-empty one.
async fn load_snapshot(state: &AppState, session: &Session) -> Result<Option<CheckoutSnapshot>> {
    let Some(id) = session.get::<CheckoutId>(keys::CHECKOUT_ID).await? else {
        return Ok(None);
    };
    Ok(state
        .checkouts()
        .get(id)
        .await
        .filter(|snapshot| !snapshot.is_empty()))
}

/// Display the checkout form, or the empty-cart view when no snapshot is
/// in progress.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    match load_snapshot(&state, &session).await? {
        Some(snapshot) => Ok(CheckoutFormTemplate {
            checkout: CheckoutView::from(&snapshot),
            email: String::new(),
            email_error: None,
            banner_error: None,
        }
        .into_response()),
        None => Ok(EmptyCartTemplate.into_response()),
    }
}

/// Submit the checkout form.
///
/// Validates the email locally before any network call; on success the
/// collaborator's redirect URL gets a full-navigation redirect. On failure
/// the shopper stays on the form with a dismissible banner and may retry -
/// the snapshot stays in the store until it expires.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let Some(snapshot) = load_snapshot(&state, &session).await? else {
        return Ok(EmptyCartTemplate.into_response());
    };

    let email = match Email::parse(form.email.trim()) {
        Ok(email) => email,
        Err(e) => {
            // Field-level failure: no network call is made.
            return Ok(CheckoutFormTemplate {
                checkout: CheckoutView::from(&snapshot),
                email: form.email,
                email_error: Some(field_error(&e)),
                banner_error: None,
            }
            .into_response());
        }
    };

    let items = snapshot
        .lines
        .iter()
        .map(LineItemInput::from_line)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let request = CheckoutRequest {
        customer_email: email,
        items,
        success_url: state.config().success_url(),
        cancel_url: state.config().cancel_url(),
    };

    match state.payments().create_checkout_session(&request).await {
        Ok(payment_session) => {
            tracing::info!(checkout_id = %snapshot.id, "handing off to hosted payment page");
            Ok(Redirect::to(&payment_session.url).into_response())
        }
        Err(e) => {
            tracing::error!(checkout_id = %snapshot.id, error = %e, "checkout session creation failed");
            Ok(CheckoutFormTemplate {
                checkout: CheckoutView::from(&snapshot),
                email: form.email,
                email_error: None,
                banner_error: Some(e.user_message().to_string()),
            }
            .into_response())
        }
    }
}

/// Map an email parse error to the form's field message.
fn field_error(error: &EmailError) -> String {
    match error {
        EmailError::Empty => "Email is required".to_string(),
        _ => "Please enter a valid email address".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_messages() {
        assert_eq!(field_error(&EmailError::Empty), "Email is required");
        assert_eq!(
            field_error(&EmailError::MissingAtSymbol),
            "Please enter a valid email address"
        );
    }
}
