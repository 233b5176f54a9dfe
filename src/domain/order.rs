//! Order status values the shipment notifier reacts to.

use crate::domain::area::ModuleId;
use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order statuses known to the pickup module, with their platform ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderStatus {
    Paid,
    Processing,
    Sent,
    /// Any other platform status.
    Other(u32),
}

impl OrderStatus {
    /// Map a platform status id to a status.
    pub fn from_id(id: u32) -> Self {
        match id {
            2 => OrderStatus::Paid,
            3 => OrderStatus::Processing,
            4 => OrderStatus::Sent,
            other => OrderStatus::Other(other),
        }
    }

    /// Get the platform status id.
    pub fn id(&self) -> u32 {
        match self {
            OrderStatus::Paid => 2,
            OrderStatus::Processing => 3,
            OrderStatus::Sent => 4,
            OrderStatus::Other(id) => *id,
        }
    }
}

/// Status to move exported orders to, as chosen by the shop operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StatusChange {
    #[default]
    NoChange,
    Processing,
    Sent,
}

impl StatusChange {
    /// Parse the form value (`nochange`, `processing`, `sent`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "nochange" => Some(StatusChange::NoChange),
            "processing" => Some(StatusChange::Processing),
            "sent" => Some(StatusChange::Sent),
            _ => None,
        }
    }

    /// Get the form value.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusChange::NoChange => "nochange",
            StatusChange::Processing => "processing",
            StatusChange::Sent => "sent",
        }
    }

    /// Get the status exported orders move to, if any.
    pub fn target_status(&self) -> Option<OrderStatus> {
        match self {
            StatusChange::NoChange => None,
            StatusChange::Processing => Some(OrderStatus::Processing),
            StatusChange::Sent => Some(OrderStatus::Sent),
        }
    }
}

/// The parts of an updated order the notifier needs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShipmentUpdate {
    pub order_id: u64,
    pub order_ref: String,
    pub customer_id: u64,
    pub delivery_module_id: ModuleId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Parcel tracking reference, if the carrier assigned one.
    pub delivery_ref: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "serde")]
    #[test]
    fn test_order_types_are_serializable() {
        fn assert_serde<T: Serialize + serde::de::DeserializeOwned>() {}
        assert_serde::<OrderStatus>();
        assert_serde::<StatusChange>();
        assert_serde::<ShipmentUpdate>();
    }

    #[test]
    fn test_status_ids_round_trip() {
        for id in 0..10 {
            assert_eq!(OrderStatus::from_id(id).id(), id);
        }
        assert_eq!(OrderStatus::from_id(4), OrderStatus::Sent);
    }

    #[test]
    fn test_status_change() {
        assert_eq!(StatusChange::parse("sent"), Some(StatusChange::Sent));
        assert_eq!(StatusChange::parse("shipped"), None);
        assert_eq!(StatusChange::NoChange.target_status(), None);
        assert_eq!(
            StatusChange::Processing.target_status(),
            Some(OrderStatus::Processing)
        );
        assert_eq!(StatusChange::Sent.as_str(), "sent");
    }
}
