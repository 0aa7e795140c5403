//! Payment outcome route handlers.
//!
//! Two independent landing pages for the return from the hosted payment
//! page. The success path blocks on verification; the failure path renders
//! immediately and marks the order failed in a detached task. Both are
//! stateless per request, so a browser refresh simply re-runs them.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use sundrop_core::{CurrencyCode, OrderId, OrderStatus, Price};

use crate::filters;
use crate::state::AppState;

/// Advice shown whenever verification cannot be completed. Deliberately
/// cautious: the charge may have succeeded server-side.
const VERIFY_FAILED_ADVICE: &str =
    "Payment verification failed. Please contact support if your payment was charged.";

/// Success page query parameters.
#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    pub session_id: Option<String>,
}

/// Failure page query parameters.
#[derive(Debug, Deserialize)]
pub struct FailedQuery {
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
}

/// Confirmed payment template.
#[derive(Template, WebTemplate)]
#[template(path = "outcome/success.html")]
pub struct PaymentSuccessTemplate {
    pub order_id: String,
    pub email: String,
    pub amount: String,
}

/// Verification failure template.
#[derive(Template, WebTemplate)]
#[template(path = "outcome/verify_failed.html")]
pub struct VerifyFailedTemplate {
    pub message: String,
}

/// Payment failed template.
#[derive(Template, WebTemplate)]
#[template(path = "outcome/failed.html")]
pub struct PaymentFailedTemplate;

/// Landing page after a successful hosted checkout.
///
/// Verifies the session with the collaborator before claiming success.
/// Without a session id there is nothing to verify and no call is made.
#[instrument(skip(state))]
pub async fn success(
    State(state): State<AppState>,
    Query(query): Query<SuccessQuery>,
) -> Response {
    let Some(session_id) = query.session_id.filter(|s| !s.is_empty()) else {
        return VerifyFailedTemplate {
            message: "No session ID found. Payment verification cannot be completed.".to_string(),
        }
        .into_response();
    };

    match state.payments().verify_payment(&session_id).await {
        Ok(confirmation) => {
            let amount = Price::from_minor_units(confirmation.amount, CurrencyCode::USD);
            PaymentSuccessTemplate {
                order_id: confirmation.order_id.to_string(),
                email: confirmation.email,
                amount: amount.to_string(),
            }
            .into_response()
        }
        Err(e) => {
            tracing::error!(session_id = %session_id, error = %e, "payment verification failed");
            VerifyFailedTemplate {
                message: VERIFY_FAILED_ADVICE.to_string(),
            }
            .into_response()
        }
    }
}

/// Landing page after a cancelled or failed hosted checkout.
///
/// When an order id is present, the order is marked failed in a detached
/// task; that call's result is logged and deliberately discarded so it can
/// never block or alter this page.
#[instrument(skip(state))]
pub async fn failed(
    State(state): State<AppState>,
    Query(query): Query<FailedQuery>,
) -> PaymentFailedTemplate {
    if let Some(order_id) = query.order_id.filter(|s| !s.is_empty()) {
        let payments = state.payments().clone();
        let order_id = OrderId::from(order_id);
        tokio::spawn(async move {
            match payments
                .update_order_status(&order_id, OrderStatus::Failed)
                .await
            {
                Ok(()) => tracing::info!(%order_id, "order marked as failed"),
                Err(e) => tracing::warn!(%order_id, error = %e, "failed to update order status"),
            }
        });
    }

    PaymentFailedTemplate
}
