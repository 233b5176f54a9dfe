//! Mock implementations for testing.
//!
//! This module provides test doubles for the ports and a capturing tracing
//! layer, enabling controlled testing of application logic.

pub mod host;
pub mod layer;
pub mod stores;

pub use host::{FixedRateTaxEngine, RecordingMailer, SentMessage};
pub use layer::{CapturedEvent, MockCaptureLayer};
pub use stores::{CountingPriceStore, StaticAreaStore};
