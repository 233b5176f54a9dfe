//! Storage doubles that count calls and inject failures.

use crate::application::ports::{AreaMembershipStore, PriceTierStore, StoreError};
use crate::domain::area::{AreaId, Destination, ModuleId};
use crate::domain::index::PriceRow;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Price store that counts fetches and can fail on demand.
#[derive(Debug, Default)]
pub struct CountingPriceStore {
    rows: Mutex<Vec<PriceRow>>,
    fetches: AtomicUsize,
    failure: Mutex<Option<String>>,
}

impl CountingPriceStore {
    pub fn new(rows: Vec<PriceRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    /// Number of `fetch_all` calls so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn replace_rows(&self, rows: Vec<PriceRow>) {
        *self.rows.lock() = rows;
    }

    /// Make the next fetch fail with `message`.
    pub fn fail_next(&self, message: &str) {
        *self.failure.lock() = Some(message.to_string());
    }
}

impl PriceTierStore for CountingPriceStore {
    fn fetch_all(&self) -> Result<Vec<PriceRow>, StoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.failure.lock().take() {
            return Err(StoreError::new("fetch price rows", message));
        }
        Ok(self.rows.lock().clone())
    }
}

/// Area store returning a fixed list, or failing.
#[derive(Debug, Default)]
pub struct StaticAreaStore {
    areas: Vec<AreaId>,
    failure: Option<String>,
    lookups: AtomicUsize,
}

impl StaticAreaStore {
    /// Every destination resolves to `areas`, for every module.
    pub fn new(areas: Vec<AreaId>) -> Self {
        Self {
            areas,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl AreaMembershipStore for StaticAreaStore {
    fn areas_for(
        &self,
        _destination: &Destination,
        _module: ModuleId,
    ) -> Result<Vec<AreaId>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(StoreError::new("resolve areas", message.clone())),
            None => Ok(self.areas.clone()),
        }
    }
}
