//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::StorefrontConfig;
use crate::services::{CheckoutStore, PaymentError, PaymentsClient};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the payment client and the checkout store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    payments: PaymentsClient,
    checkouts: CheckoutStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment client fails to build (e.g. the API
    /// key is not a valid header value).
    pub fn new(config: StorefrontConfig) -> Result<Self, PaymentError> {
        let payments = PaymentsClient::new(&config.payment)?;
        let checkouts = CheckoutStore::new(Duration::from_secs(config.checkout_ttl_secs));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                payments,
                checkouts,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the payment collaborator client.
    #[must_use]
    pub fn payments(&self) -> &PaymentsClient {
        &self.inner.payments
    }

    /// Get a reference to the checkout snapshot store.
    #[must_use]
    pub fn checkouts(&self) -> &CheckoutStore {
        &self.inner.checkouts
    }
}
