//! Geographic identifiers used to route a cart to a shipping zone.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a shipping area (a zone grouping countries and states).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AreaId(pub u32);

/// Identifier of a country in the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountryId(pub u32);

/// Identifier of a state or region inside a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateId(pub u32);

/// Identifier of the delivery module whose enabled areas are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModuleId(pub u32);

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a cart is shipped to.
///
/// The state is optional; how it participates in area matching is decided by
/// the [`AreaMembershipStore`](crate::application::ports::AreaMembershipStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Destination {
    pub country: CountryId,
    pub state: Option<StateId>,
}

impl Destination {
    /// A destination identified by its country only.
    pub fn country(country: CountryId) -> Self {
        Self {
            country,
            state: None,
        }
    }

    /// A destination inside a specific state of a country.
    pub fn with_state(country: CountryId, state: StateId) -> Self {
        Self {
            country,
            state: Some(state),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            Some(state) => write!(f, "country {} / state {}", self.country, state.0),
            None => write!(f, "country {}", self.country),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_display() {
        assert_eq!(Destination::country(CountryId(64)).to_string(), "country 64");
        assert_eq!(
            Destination::with_state(CountryId(196), StateId(12)).to_string(),
            "country 196 / state 12"
        );
    }
}
