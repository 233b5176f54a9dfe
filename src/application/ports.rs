//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports; the host
//! platform provides database-backed ones, this crate ships in-memory ones.

use crate::domain::area::{AreaId, Destination, ModuleId};
use crate::domain::index::PriceRow;
use crate::domain::quote::TaxRuleId;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::Debug;
use thiserror::Error;

/// Failure of a storage collaborator. Never retried by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {message}")]
pub struct StoreError {
    /// What was being read or written, e.g. `fetch price rows`
    pub operation: String,
    pub message: String,
}

impl StoreError {
    /// Create an error for a failed `operation`.
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Port for the bulk read of the price table.
pub trait PriceTierStore: Send + Sync + Debug {
    /// Fetch every price row joined with its area name.
    ///
    /// Rows are expected ordered by area then weight, but callers must not
    /// rely on it.
    fn fetch_all(&self) -> Result<Vec<PriceRow>, StoreError>;
}

/// Port for the country/state to area relation.
pub trait AreaMembershipStore: Send + Sync + Debug {
    /// Areas containing `destination` that are enabled for `module`.
    fn areas_for(
        &self,
        destination: &Destination,
        module: ModuleId,
    ) -> Result<Vec<AreaId>, StoreError>;
}

/// Port for named configuration scalars.
///
/// Keys are independent; each call is an atomic single-key operation.
pub trait ConfigStore: Send + Sync + Debug {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Port for the shop-wide "everything ships free" toggle.
pub trait FreeShippingSwitch: Send + Sync + Debug {
    fn is_active(&self) -> Result<bool, StoreError>;
}

/// Failure reported by the tax engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tax rule {tax_rule_id} could not be applied: {message}")]
pub struct TaxError {
    pub tax_rule_id: TaxRuleId,
    pub message: String,
}

/// Port for the host's tax engine.
pub trait TaxEngine: Send + Sync + Debug {
    /// Apply a tax rule to a pre-tax amount for a destination and locale.
    fn apply_tax_rule(
        &self,
        amount: Decimal,
        tax_rule_id: TaxRuleId,
        destination: &Destination,
        locale: &str,
    ) -> Result<Decimal, TaxError>;
}

/// Failure reported by the mailer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mail delivery failed: {0}")]
pub struct MailError(pub String);

/// Template parameters of a customer message.
pub type MessageParams = BTreeMap<&'static str, String>;

/// Port for the host's mailer. Templating and transport happen behind it.
pub trait Mailer: Send + Sync + Debug {
    /// Whether a message template with this name exists.
    fn message_exists(&self, name: &str) -> Result<bool, MailError>;

    /// Render message `name` with `params` and send it to the customer.
    fn send_to_customer(
        &self,
        name: &str,
        customer_id: u64,
        params: &MessageParams,
    ) -> Result<(), MailError>;
}
