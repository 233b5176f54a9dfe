//! Whether the pickup method should be listed for a cart.

use crate::application::area_resolver::AreaResolver;
use crate::application::ports::StoreError;
use crate::application::price_table::PriceTable;
use crate::domain::area::Destination;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Answers "can this cart be delivered here" for delivery-method listings.
///
/// Unlike the calculator, any resolved area able to carry the weight is
/// enough, and an unserved destination is a plain `false`.
#[derive(Debug, Clone)]
pub struct EligibilityChecker {
    prices: Arc<PriceTable>,
    areas: AreaResolver,
}

impl EligibilityChecker {
    /// Create a checker sharing the price cache.
    pub fn new(prices: Arc<PriceTable>, areas: AreaResolver) -> Self {
        Self { prices, areas }
    }

    /// # Errors
    /// Only storage failures; the caller treats the listing as failed.
    pub fn is_eligible(
        &self,
        destination: &Destination,
        weight: Decimal,
    ) -> Result<bool, StoreError> {
        let areas = self.areas.areas_for(destination)?;
        if areas.is_empty() {
            return Ok(false);
        }

        let index = self.prices.load()?;
        Ok(areas.iter().any(|area| {
            index
                .get(*area)
                .is_some_and(|prices| prices.tiers.covers(weight))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::metrics::Metrics;
    use crate::domain::area::{AreaId, CountryId, ModuleId};
    use crate::domain::index::PriceRow;
    use crate::infrastructure::mocks::{CountingPriceStore, StaticAreaStore};
    use rust_decimal_macros::dec;

    fn checker(areas: StaticAreaStore) -> (Arc<CountingPriceStore>, EligibilityChecker) {
        let store = Arc::new(CountingPriceStore::new(vec![PriceRow {
            area_id: AreaId(2),
            weight_max: dec!(20),
            price: dec!(9.90),
            area_name: "Europe".to_string(),
        }]));
        let prices = Arc::new(PriceTable::new(store.clone(), Metrics::new()));
        let resolver = AreaResolver::new(Arc::new(areas), ModuleId(1));
        (store, EligibilityChecker::new(prices, resolver))
    }

    #[test]
    fn test_any_area_may_carry_the_weight() {
        let (_, checker) = checker(StaticAreaStore::new(vec![AreaId(1), AreaId(2)]));
        let destination = Destination::country(CountryId(8));

        assert!(checker.is_eligible(&destination, dec!(20)).unwrap());
        assert!(!checker.is_eligible(&destination, dec!(21)).unwrap());
    }

    #[test]
    fn test_unserved_destination_skips_price_table() {
        let (store, checker) = checker(StaticAreaStore::new(Vec::new()));

        assert!(!checker
            .is_eligible(&Destination::country(CountryId(8)), dec!(1))
            .unwrap());
        assert_eq!(store.fetch_count(), 0);
    }

    #[test]
    fn test_storage_failure_is_an_error() {
        let (_, checker) = checker(StaticAreaStore::failing("lost connection"));

        let err = checker
            .is_eligible(&Destination::country(CountryId(8)), dec!(1))
            .unwrap_err();
        assert_eq!(err.operation, "resolve areas");
    }
}
