//! Per-area price lists built from raw price-table rows.

use crate::domain::area::AreaId;
use crate::domain::tier::TierTable;
use ahash::AHashMap;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A price-table row joined with the name of its area.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriceRow {
    pub area_id: AreaId,
    pub weight_max: Decimal,
    pub price: Decimal,
    pub area_name: String,
}

/// Price list of a single area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaPrices {
    /// Human readable description, e.g. `area 1 : France`.
    pub label: String,
    pub tiers: TierTable,
}

/// Mapping from area to its ordered price list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceIndex {
    areas: HashMap<AreaId, AreaPrices, ahash::RandomState>,
}

impl PriceIndex {
    /// Group rows by area. The label is taken from the first row of an area.
    pub fn from_rows(rows: impl IntoIterator<Item = PriceRow>) -> Self {
        let mut labels: AHashMap<AreaId, String> = AHashMap::new();
        let mut grouped: BTreeMap<AreaId, Vec<(Decimal, Decimal)>> = BTreeMap::new();

        for row in rows {
            labels
                .entry(row.area_id)
                .or_insert_with(|| format!("area {} : {}", row.area_id, row.area_name));
            grouped
                .entry(row.area_id)
                .or_default()
                .push((row.weight_max, row.price));
        }

        let areas = grouped
            .into_iter()
            .map(|(area_id, pairs)| {
                let label = labels.remove(&area_id).unwrap_or_default();
                let tiers = TierTable::from_pairs(pairs);
                (area_id, AreaPrices { label, tiers })
            })
            .collect();

        Self { areas }
    }

    /// Get the price list of an area.
    pub fn get(&self, area: AreaId) -> Option<&AreaPrices> {
        self.areas.get(&area)
    }

    /// Tiers of an area, if it is priced and has at least one tier.
    pub fn serviceable(&self, area: AreaId) -> Option<&TierTable> {
        self.get(area)
            .map(|prices| &prices.tiers)
            .filter(|tiers| !tiers.is_empty())
    }

    /// Number of priced areas.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Check if no area is priced.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Total number of tiers across all areas.
    pub fn tier_count(&self) -> usize {
        self.areas.values().map(|prices| prices.tiers.len()).sum()
    }

    /// Iterate over all priced areas, in no particular order.
    pub fn areas(&self) -> impl Iterator<Item = (&AreaId, &AreaPrices)> {
        self.areas.iter()
    }
}
