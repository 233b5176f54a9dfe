//! Weight tiers of a shipping area.
//!
//! A [`TierTable`] is the ordered price list of one area. Tiers partition the
//! weight axis into brackets `(0, w1], (w1, w2], ...`; a cart falls into the
//! bracket whose upper bound is the smallest one still covering its weight.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One `(weight_max, price)` pair of an area's price list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriceTier {
    /// Inclusive upper bound of the weight bracket.
    pub weight_max: Decimal,
    /// Pre-tax postage for carts in this bracket.
    pub price: Decimal,
}

impl PriceTier {
    /// Create a tier covering weights up to `weight_max`.
    pub fn new(weight_max: Decimal, price: Decimal) -> Self {
        Self { weight_max, price }
    }
}

/// Failure to fit a weight into a tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierError {
    /// The weight is above the heaviest bracket.
    WeightExceeded { weight: Decimal, max_weight: Decimal },
    /// The table has no tiers at all.
    Empty,
}

/// Tiers of one area, sorted ascending by `weight_max` with unique bounds.
///
/// # Example
/// ```
/// use pickup_postage::TierTable;
/// use rust_decimal::Decimal;
///
/// let table = TierTable::from_pairs([
///     (Decimal::new(10, 0), Decimal::new(690, 2)),
///     (Decimal::new(5, 0), Decimal::new(490, 2)),
/// ]);
///
/// let tier = table.select(Decimal::new(7, 0)).unwrap();
/// assert_eq!(tier.price, Decimal::new(690, 2));
///
/// // Bounds are inclusive
/// let tier = table.select(Decimal::new(5, 0)).unwrap();
/// assert_eq!(tier.price, Decimal::new(490, 2));
///
/// assert!(table.select(Decimal::new(12, 0)).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TierTable {
    tiers: Vec<PriceTier>,
}

impl TierTable {
    /// Build a table from `(weight_max, price)` pairs in any order.
    ///
    /// When two pairs share a bound the later one wins.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Decimal, Decimal)>) -> Self {
        let ordered: BTreeMap<Decimal, Decimal> = pairs.into_iter().collect();
        Self {
            tiers: ordered
                .into_iter()
                .map(|(weight_max, price)| PriceTier::new(weight_max, price))
                .collect(),
        }
    }

    /// Get the tiers, lightest first.
    pub fn tiers(&self) -> &[PriceTier] {
        &self.tiers
    }

    /// Get the number of tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Check if the table has no tiers.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Upper bound of the heaviest bracket, if any.
    pub fn max_weight(&self) -> Option<Decimal> {
        self.tiers.last().map(|tier| tier.weight_max)
    }

    /// Whether a cart of `weight` fits under the heaviest bracket.
    pub fn covers(&self, weight: Decimal) -> bool {
        self.max_weight().is_some_and(|max| weight <= max)
    }

    /// Select the tier with the smallest `weight_max >= weight`.
    pub fn select(&self, weight: Decimal) -> Result<&PriceTier, TierError> {
        let max_weight = self.max_weight().ok_or(TierError::Empty)?;
        let index = self.tiers.partition_point(|tier| tier.weight_max < weight);

        self.tiers
            .get(index)
            .ok_or(TierError::WeightExceeded { weight, max_weight })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> TierTable {
        TierTable::from_pairs([
            (dec!(5), dec!(4.90)),
            (dec!(10), dec!(6.90)),
            (dec!(1), dec!(2.50)),
        ])
    }

    #[test]
    fn test_from_pairs_sorts_bounds() {
        let bounds: Vec<_> = table().tiers().iter().map(|t| t.weight_max).collect();
        assert_eq!(bounds, vec![dec!(1), dec!(5), dec!(10)]);
    }

    #[test]
    fn test_duplicate_bound_keeps_last_price() {
        let table = TierTable::from_pairs([(dec!(5), dec!(4.90)), (dec!(5.0), dec!(5.10))]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.tiers()[0].price, dec!(5.10));
    }

    #[test]
    fn test_select_picks_smallest_covering_tier() {
        let table = table();
        assert_eq!(table.select(dec!(0)).unwrap().price, dec!(2.50));
        assert_eq!(table.select(dec!(0.4)).unwrap().price, dec!(2.50));
        assert_eq!(table.select(dec!(1.01)).unwrap().price, dec!(4.90));
        assert_eq!(table.select(dec!(7)).unwrap().price, dec!(6.90));
    }

    #[test]
    fn test_select_bound_is_inclusive() {
        let table = table();
        assert_eq!(table.select(dec!(1)).unwrap().weight_max, dec!(1));
        assert_eq!(table.select(dec!(5)).unwrap().weight_max, dec!(5));
        assert_eq!(table.select(dec!(10)).unwrap().weight_max, dec!(10));
    }

    #[test]
    fn test_select_weight_exceeded() {
        assert_eq!(
            table().select(dec!(10.001)),
            Err(TierError::WeightExceeded {
                weight: dec!(10.001),
                max_weight: dec!(10),
            })
        );
    }

    #[test]
    fn test_empty_table() {
        let table = TierTable::default();
        assert!(table.is_empty());
        assert_eq!(table.max_weight(), None);
        assert!(!table.covers(dec!(0)));
        assert_eq!(table.select(dec!(1)), Err(TierError::Empty));
    }

    #[test]
    fn test_covers() {
        let table = table();
        assert!(table.covers(dec!(10)));
        assert!(!table.covers(dec!(10.5)));
    }
}
