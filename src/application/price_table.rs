//! Process-lifetime cache of the price index.
//!
//! The index is a pure function of the price-table rows, so it is built once
//! and shared by every request until [`PriceTable::refresh`] or
//! [`PriceTable::invalidate`] is called.

use crate::application::metrics::Metrics;
use crate::application::ports::{PriceTierStore, StoreError};
use crate::domain::index::PriceIndex;
use parking_lot::{ReentrantMutex, RwLock};
use std::sync::Arc;

/// Lazily built, shared price index.
///
/// Reads after the first build only take the slot's read lock. The first
/// build is serialised by a reentrant guard so concurrent cold readers cause a
/// single storage fetch.
#[derive(Debug)]
pub struct PriceTable {
    store: Arc<dyn PriceTierStore>,
    slot: RwLock<Option<Arc<PriceIndex>>>,
    build_guard: ReentrantMutex<()>,
    metrics: Metrics,
}

impl PriceTable {
    pub fn new(store: Arc<dyn PriceTierStore>, metrics: Metrics) -> Self {
        Self {
            store,
            slot: RwLock::new(None),
            build_guard: ReentrantMutex::new(()),
            metrics,
        }
    }

    /// Return the cached index, building it on first use.
    ///
    /// A storage failure is returned as is and nothing is cached, so the next
    /// call tries again.
    pub fn load(&self) -> Result<Arc<PriceIndex>, StoreError> {
        if let Some(index) = self.cached() {
            return Ok(index);
        }

        let _guard = self.build_guard.lock();
        // Another reader may have finished the build while we waited
        if let Some(index) = self.cached() {
            return Ok(index);
        }
        self.build()
    }

    /// Rebuild the index from storage now, replacing the cached one.
    pub fn refresh(&self) -> Result<Arc<PriceIndex>, StoreError> {
        let _guard = self.build_guard.lock();
        self.build()
    }

    /// Drop the cached index; the next [`load`](Self::load) rebuilds it.
    pub fn invalidate(&self) {
        let _guard = self.build_guard.lock();
        *self.slot.write() = None;
        tracing::debug!("price table invalidated");
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.read().is_some()
    }

    fn cached(&self) -> Option<Arc<PriceIndex>> {
        self.slot.read().clone()
    }

    fn build(&self) -> Result<Arc<PriceIndex>, StoreError> {
        let rows = self.store.fetch_all().map_err(|e| {
            tracing::warn!(error = %e, "failed to read price table");
            e
        })?;
        let row_count = rows.len();
        let index = Arc::new(PriceIndex::from_rows(rows));

        self.metrics.record_price_table_build();
        tracing::debug!(
            rows = row_count,
            areas = index.len(),
            tiers = index.tier_count(),
            "price table built"
        );

        *self.slot.write() = Some(Arc::clone(&index));
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::area::AreaId;
    use crate::domain::index::PriceRow;
    use crate::infrastructure::mocks::CountingPriceStore;
    use rust_decimal_macros::dec;

    fn rows() -> Vec<PriceRow> {
        vec![PriceRow {
            area_id: AreaId(1),
            weight_max: dec!(5),
            price: dec!(4.90),
            area_name: "France".to_string(),
        }]
    }

    #[test]
    fn test_load_fetches_once() {
        let store = Arc::new(CountingPriceStore::new(rows()));
        let metrics = Metrics::new();
        let table = PriceTable::new(store.clone(), metrics.clone());

        assert!(!table.is_loaded());
        let first = table.load().unwrap();
        let second = table.load().unwrap();

        assert!(table.is_loaded());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.fetch_count(), 1);
        assert_eq!(metrics.price_table_builds(), 1);
    }

    #[test]
    fn test_refresh_rereads_storage() {
        let store = Arc::new(CountingPriceStore::new(rows()));
        let table = PriceTable::new(store.clone(), Metrics::new());

        table.load().unwrap();
        store.replace_rows(Vec::new());
        let refreshed = table.refresh().unwrap();

        assert!(refreshed.is_empty());
        assert!(table.load().unwrap().is_empty());
        assert_eq!(store.fetch_count(), 2);
    }

    #[test]
    fn test_invalidate_forces_rebuild() {
        let store = Arc::new(CountingPriceStore::new(rows()));
        let table = PriceTable::new(store.clone(), Metrics::new());

        table.load().unwrap();
        table.invalidate();
        assert!(!table.is_loaded());

        table.load().unwrap();
        assert_eq!(store.fetch_count(), 2);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let store = Arc::new(CountingPriceStore::new(rows()));
        store.fail_next("connection refused");
        let table = PriceTable::new(store.clone(), Metrics::new());

        let err = table.load().unwrap_err();
        assert_eq!(err.message, "connection refused");
        assert!(!table.is_loaded());

        assert_eq!(table.load().unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_cold_loads_fetch_once() {
        use std::thread;

        let store = Arc::new(CountingPriceStore::new(rows()));
        let table = Arc::new(PriceTable::new(store.clone(), Metrics::new()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let table = Arc::clone(&table);
                thread::spawn(move || table.load().unwrap().len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        assert_eq!(store.fetch_count(), 1);
    }
}
