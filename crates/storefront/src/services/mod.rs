//! External service clients and short-lived stores.

pub mod checkout_store;
pub mod payments;

pub use checkout_store::CheckoutStore;
pub use payments::{
    CheckoutRequest, LineItemInput, OrderConfirmation, PaymentError, PaymentSession, PaymentsClient,
};
