//! In-memory implementations of the storage ports.
//!
//! The host platform normally backs these ports with its database. The
//! adapters here are thread-safe and suitable for embedding, seeding from
//! fixtures, and tests.

use crate::application::ports::{
    AreaMembershipStore, ConfigStore, FreeShippingSwitch, PriceTierStore, StoreError,
};
use crate::domain::area::{AreaId, CountryId, Destination, ModuleId, StateId};
use crate::domain::index::PriceRow;
use dashmap::{DashMap, DashSet};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Thread-safe configuration store backed by DashMap.
///
/// DashMap gives lock-free reads and per-shard locking for writes, which
/// matches the independent single-key semantics of configuration values.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    map: DashMap<String, String>,
}

impl InMemoryConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    /// Create a store pre-filled with `(key, value)` pairs.
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            map: values
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Remove a key, returning its value.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.map.remove(key).map(|(_, value)| value)
    }

    /// Get the number of stored keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.map.get(key).map(|value| value.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Price table held in memory.
#[derive(Debug, Default)]
pub struct InMemoryPriceStore {
    rows: RwLock<Vec<PriceRow>>,
}

impl InMemoryPriceStore {
    /// Create a store serving `rows`.
    pub fn new(rows: Vec<PriceRow>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Add a row.
    pub fn push(&self, row: PriceRow) {
        self.rows.write().push(row);
    }

    /// Replace every row. Cached indexes only see this after a refresh.
    pub fn replace(&self, rows: Vec<PriceRow>) {
        *self.rows.write() = rows;
    }
}

impl PriceTierStore for InMemoryPriceStore {
    fn fetch_all(&self) -> Result<Vec<PriceRow>, StoreError> {
        let mut rows = self.rows.read().clone();
        rows.sort_by(|a, b| {
            a.area_id
                .cmp(&b.area_id)
                .then_with(|| a.weight_max.cmp(&b.weight_max))
        });
        Ok(rows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Membership {
    area: AreaId,
    country: CountryId,
    state: Option<StateId>,
}

impl Membership {
    /// Country-wide entries match any destination in the country; state
    /// entries only match that state.
    fn contains(&self, destination: &Destination) -> bool {
        self.country == destination.country
            && (self.state.is_none() || self.state == destination.state)
    }
}

/// Area membership and per-module area activation held in memory.
///
/// Lookups return areas in the order their memberships were added.
#[derive(Debug, Default)]
pub struct InMemoryAreaStore {
    memberships: RwLock<Vec<Membership>>,
    enabled: DashSet<(AreaId, ModuleId)>,
}

impl InMemoryAreaStore {
    /// Create a store with no areas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a whole country in an area.
    pub fn add_country(&self, area: AreaId, country: CountryId) {
        self.memberships.write().push(Membership {
            area,
            country,
            state: None,
        });
    }

    /// Put one state of a country in an area.
    pub fn add_state(&self, area: AreaId, country: CountryId, state: StateId) {
        self.memberships.write().push(Membership {
            area,
            country,
            state: Some(state),
        });
    }

    /// Enable an area for a delivery module.
    pub fn enable(&self, area: AreaId, module: ModuleId) {
        self.enabled.insert((area, module));
    }

    pub fn disable(&self, area: AreaId, module: ModuleId) {
        self.enabled.remove(&(area, module));
    }
}

impl AreaMembershipStore for InMemoryAreaStore {
    fn areas_for(
        &self,
        destination: &Destination,
        module: ModuleId,
    ) -> Result<Vec<AreaId>, StoreError> {
        Ok(self
            .memberships
            .read()
            .iter()
            .filter(|membership| membership.contains(destination))
            .map(|membership| membership.area)
            .filter(|area| self.enabled.contains(&(*area, module)))
            .collect())
    }
}

/// Shop-wide free shipping toggle.
#[derive(Debug, Default)]
pub struct FreeShippingFlag {
    active: AtomicBool,
}

impl FreeShippingFlag {
    /// Create a switch in the given state.
    pub fn new(active: bool) -> Self {
        Self {
            active: AtomicBool::new(active),
        }
    }

    /// Turn the switch on or off.
    pub fn set(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }
}

impl FreeShippingSwitch for FreeShippingFlag {
    fn is_active(&self) -> Result<bool, StoreError> {
        Ok(self.active.load(Ordering::Relaxed))
    }
}
