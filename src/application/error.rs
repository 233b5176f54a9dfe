//! Errors surfaced to the checkout flow.

use crate::application::ports::{StoreError, TaxError};
use crate::domain::quote::UnavailableReason;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, DeliveryError>;

/// A stored configuration value that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid value {value:?} for configuration key {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Why a quote or postage could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The method must not be offered for this cart.
    #[error("pickup delivery {0}")]
    Unavailable(UnavailableReason),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tax(#[from] TaxError),
}

impl DeliveryError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DeliveryError::Unavailable(_))
    }

    pub fn unavailable_reason(&self) -> Option<&UnavailableReason> {
        match self {
            DeliveryError::Unavailable(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<UnavailableReason> for DeliveryError {
    fn from(reason: UnavailableReason) -> Self {
        DeliveryError::Unavailable(reason)
    }
}
