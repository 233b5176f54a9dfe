//! The capability set a delivery method exposes to the checkout flow.

use crate::application::error::Result;
use crate::application::ports::StoreError;
use crate::domain::area::Destination;
use crate::domain::quote::DeliveryQuote;
use rust_decimal::Decimal;

/// Everything the checkout flow knows about a cart when asking for postage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub destination: Destination,
    /// Cart weight in kilograms, `>= 0`.
    pub weight: Decimal,
    /// Cart total including taxes, `>= 0`.
    pub cart_taxed_amount: Decimal,
    pub locale: String,
}

impl QuoteRequest {
    /// Create a request with the default `en_US` locale.
    pub fn new(destination: Destination, weight: Decimal, cart_taxed_amount: Decimal) -> Self {
        Self {
            destination,
            weight,
            cart_taxed_amount,
            locale: "en_US".to_string(),
        }
    }

    /// Set the locale passed to the tax engine.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

/// How a delivery method hands parcels over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    Pickup,
    Delivery,
}

impl DeliveryMode {
    /// Get the mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::Pickup => "pickup",
            DeliveryMode::Delivery => "delivery",
        }
    }
}

/// A delivery method as seen by the checkout flow.
pub trait DeliveryModule: Send + Sync {
    /// Raw postage for a cart, or why the method cannot carry it.
    fn quote(&self, request: &QuoteRequest) -> Result<DeliveryQuote>;

    /// Whether the method should be listed for this destination and weight.
    fn is_eligible(
        &self,
        destination: &Destination,
        weight: Decimal,
    ) -> std::result::Result<bool, StoreError>;

    fn delivery_mode(&self) -> DeliveryMode;
}
