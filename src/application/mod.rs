//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates the domain logic behind the delivery method:
//! - Price table cache (built once from storage)
//! - Area resolution for a destination
//! - Postage calculation and eligibility checks
//! - Typed configuration access
//! - Shipment notifications
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from the host platform's storage, tax engine and mailer.

pub mod area_resolver;
pub mod calculator;
pub mod config;
pub mod delivery;
pub mod eligibility;
pub mod error;
pub mod metrics;
pub mod notifier;
pub mod ports;
pub mod price_table;
