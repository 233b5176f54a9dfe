//! Maps a destination to the areas this module serves.

use crate::application::ports::{AreaMembershipStore, StoreError};
use crate::domain::area::{AreaId, Destination, ModuleId};
use ahash::AHashSet;
use std::sync::Arc;

/// Resolves destinations to the areas enabled for one delivery module.
#[derive(Debug, Clone)]
pub struct AreaResolver {
    store: Arc<dyn AreaMembershipStore>,
    module: ModuleId,
}

impl AreaResolver {
    /// Create a resolver for `module`.
    pub fn new(store: Arc<dyn AreaMembershipStore>, module: ModuleId) -> Self {
        Self { store, module }
    }

    /// Get the module whose enabled areas are returned.
    pub fn module(&self) -> ModuleId {
        self.module
    }

    /// Areas containing `destination` and enabled for the module.
    ///
    /// Keeps the store's order and drops repeated ids. Empty when the
    /// destination is not served.
    pub fn areas_for(&self, destination: &Destination) -> Result<Vec<AreaId>, StoreError> {
        let areas = self.store.areas_for(destination, self.module)?;
        let mut seen = AHashSet::with_capacity(areas.len());
        Ok(areas.into_iter().filter(|area| seen.insert(*area)).collect())
    }
}
