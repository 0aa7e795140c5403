//! Payment collaborator API client.
//!
//! The storefront delegates payment to a hosted checkout page: it asks the
//! collaborator for a session, redirects the shopper to the returned URL,
//! and on return verifies the outcome or marks the order failed. All three
//! operations go through this client; the collaborator's backend is opaque
//! beyond them.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sundrop_core::{CartLine, Email, OrderId, OrderStatus, ProductId};

use crate::config::PaymentApiConfig;

/// Errors that can occur when talking to the payment collaborator.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Session was created but the response carried no redirect URL.
    #[error("checkout session response carried no redirect URL")]
    MissingRedirectUrl,

    /// A line amount does not fit in minor units.
    #[error("amount not representable in minor units")]
    UnrepresentableAmount,

    /// Failed to parse a response or build the client.
    #[error("parse error: {0}")]
    Parse(String),
}

impl PaymentError {
    /// User-facing message for the checkout error banner.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingRedirectUrl => {
                "Failed to create checkout session. Please try again."
            }
            _ => "An error occurred during checkout. Please try again.",
        }
    }
}

/// Payment collaborator API client.
#[derive(Clone)]
pub struct PaymentsClient {
    client: reqwest::Client,
    base_url: String,
}

impl PaymentsClient {
    /// Create a new payment collaborator client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &PaymentApiConfig) -> Result<Self, PaymentError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value)
                .map_err(|e| PaymentError::Parse(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    /// Create a checkout session for the given request.
    ///
    /// Returns the URL of the hosted payment page to redirect the shopper to.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the collaborator responds with a
    /// non-2xx status, or the response carries no redirect URL.
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<PaymentSession, PaymentError> {
        let url = format!("{}/checkout/sessions", self.base_url);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: CreateSessionResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        body.url
            .filter(|u| !u.is_empty())
            .map(|url| PaymentSession { url })
            .ok_or(PaymentError::MissingRedirectUrl)
    }

    /// Verify the payment behind a session id.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the collaborator does not
    /// confirm the payment.
    pub async fn verify_payment(
        &self,
        session_id: &str,
    ) -> Result<OrderConfirmation, PaymentError> {
        let url = format!(
            "{}/checkout/sessions/{}",
            self.base_url,
            urlencoding::encode(session_id)
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))
    }

    /// Set the status of an order (e.g. mark it failed).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the collaborator rejects it.
    pub async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), PaymentError> {
        let url = format!(
            "{}/orders/{}/status",
            self.base_url,
            urlencoding::encode(order_id.as_str())
        );

        let response = self
            .client
            .post(&url)
            .json(&UpdateStatusBody { status })
            .send()
            .await?;
        let response_status = response.status();

        if !response_status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: response_status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

/// Request to create a checkout session.
///
/// Built once from the validated email and the checkout snapshot at form
/// submission; immutable afterward. Serialized verbatim as the request body
/// (camelCase, the collaborator's convention).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer_email: Email,
    pub items: Vec<LineItemInput>,
    pub success_url: String,
    pub cancel_url: String,
}

/// One cart line as sent to the collaborator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price in minor units (cents).
    pub unit_amount: i64,
    pub quantity: u32,
}

impl LineItemInput {
    /// Convert a cart line, expressing the unit price in minor units.
    ///
    /// # Errors
    ///
    /// Returns error if the amount does not fit in minor units.
    pub fn from_line(line: &CartLine) -> Result<Self, PaymentError> {
        Ok(Self {
            product_id: line.product_id,
            name: line.name.clone(),
            unit_amount: line
                .unit_price
                .minor_units()
                .ok_or(PaymentError::UnrepresentableAmount)?,
            quantity: line.quantity,
        })
    }
}

/// Collaborator response to session creation.
#[derive(Debug, Deserialize)]
struct CreateSessionResponse {
    url: Option<String>,
}

/// A created payment session: the hosted payment page to hand control to.
#[derive(Debug, Clone)]
pub struct PaymentSession {
    pub url: String,
}

/// Collaborator confirmation of a verified payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub email: String,
    /// Amount paid, in minor units.
    pub amount: i64,
}

/// Body for the order status update call.
#[derive(Debug, Serialize)]
struct UpdateStatusBody {
    status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sundrop_core::{CurrencyCode, Price};

    #[test]
    fn test_checkout_request_wire_shape() {
        let request = CheckoutRequest {
            customer_email: Email::parse("user@example.com").unwrap(),
            items: vec![LineItemInput {
                product_id: ProductId::new(1),
                name: "Blood Orange Marmalade".to_string(),
                unit_amount: 850,
                quantity: 2,
            }],
            success_url: "http://localhost:4000/payment-success?session_id={CHECKOUT_SESSION_ID}"
                .to_string(),
            cancel_url: "http://localhost:4000/payment-failed".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["customerEmail"], "user@example.com");
        assert_eq!(json["items"][0]["productId"], 1);
        assert_eq!(json["items"][0]["unitAmount"], 850);
        assert_eq!(json["items"][0]["quantity"], 2);
        assert!(json["successUrl"].as_str().unwrap().contains("session_id"));
    }

    #[test]
    fn test_order_confirmation_wire_shape() {
        let confirmation: OrderConfirmation = serde_json::from_str(
            r#"{"orderId": "o1", "email": "a@b.com", "amount": 2599}"#,
        )
        .unwrap();
        assert_eq!(confirmation.order_id.as_str(), "o1");
        assert_eq!(confirmation.email, "a@b.com");
        assert_eq!(confirmation.amount, 2599);
    }

    #[test]
    fn test_update_status_body_wire_shape() {
        let json = serde_json::to_value(UpdateStatusBody {
            status: OrderStatus::Failed,
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
    }

    #[test]
    fn test_line_item_from_line() {
        let line = CartLine {
            product_id: ProductId::new(3),
            name: "Yuzu Sparkling Tonic".to_string(),
            unit_price: Price::from_minor_units(475, CurrencyCode::USD),
            image: String::new(),
            quantity: 4,
        };
        let item = LineItemInput::from_line(&line).unwrap();
        assert_eq!(item.unit_amount, 475);
        assert_eq!(item.quantity, 4);
    }

    #[test]
    fn test_user_messages_are_nonempty() {
        assert!(!PaymentError::MissingRedirectUrl.user_message().is_empty());
        assert!(
            !PaymentError::Api {
                status: 500,
                message: String::new()
            }
            .user_message()
            .is_empty()
        );
    }
}
