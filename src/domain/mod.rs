//! Domain layer - pure pricing types with no I/O.
//!
//! This layer contains the core concepts and invariants of postage pricing:
//! - Geographic identifiers and destinations
//! - Weight tiers and the per-area price index
//! - Free shipping thresholds and quotes
//! - The stored form of the excluded zip-code list
//! - Order statuses relevant to shipment notifications
//!
//! All types in this layer are pure and easily testable.

pub mod area;
pub mod index;
pub mod order;
pub mod quote;
pub mod tier;
pub mod zip_codes;
