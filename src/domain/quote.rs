//! Quote values produced by the postage calculator.

use crate::domain::area::{AreaId, Destination};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tax rule applied to the raw postage by the host's tax engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TaxRuleId {
    /// No rule configured; postage is used untaxed.
    #[default]
    Unset,
    Id(u32),
}

impl TaxRuleId {
    /// Check if a tax rule is configured.
    pub fn is_set(&self) -> bool {
        matches!(self, TaxRuleId::Id(_))
    }
}

impl fmt::Display for TaxRuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxRuleId::Unset => write!(f, "unset"),
            TaxRuleId::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Cart amount at or above which postage is waived. Zero disables it.
///
/// Cart amounts carry more precision than money does, so they are rounded to
/// cents (half away from zero) before the comparison.
///
/// # Example
/// ```
/// use pickup_postage::FreeShippingThreshold;
/// use rust_decimal::Decimal;
///
/// let threshold = FreeShippingThreshold::new(Decimal::new(50, 0));
/// assert!(threshold.applies_to(Decimal::new(49_995, 3))); // 49.995 -> 50.00
/// assert!(!threshold.applies_to(Decimal::new(49_994, 3)));
///
/// assert!(!FreeShippingThreshold::disabled().applies_to(Decimal::new(1_000, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FreeShippingThreshold(Decimal);

impl FreeShippingThreshold {
    /// Create a threshold. Zero or less disables it.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// A threshold that never applies.
    pub fn disabled() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the configured amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Check if the threshold is above zero.
    pub fn is_enabled(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Whether a cart with this taxed amount ships for free.
    pub fn applies_to(&self, cart_taxed_amount: Decimal) -> bool {
        self.is_enabled() && round_to_cents(cart_taxed_amount) >= self.0
    }
}

/// Round a monetary amount to two decimals, half away from zero.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Why a quote was waived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FreeShipping {
    /// The shop-wide free shipping switch is on.
    Switch,
    /// The cart reached the configured threshold.
    Threshold,
}

/// Raw postage for a cart plus the tax rule the caller must apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeliveryQuote {
    /// Pre-tax postage.
    pub price: Decimal,
    pub tax_rule_id: TaxRuleId,
    /// Area whose price list was used, absent when shipping was waived.
    pub area: Option<AreaId>,
    pub free_shipping: Option<FreeShipping>,
}

impl DeliveryQuote {
    /// A quote priced from `area`'s tier table.
    pub fn priced(area: AreaId, price: Decimal, tax_rule_id: TaxRuleId) -> Self {
        Self {
            price,
            tax_rule_id,
            area: Some(area),
            free_shipping: None,
        }
    }

    /// A waived quote with price zero.
    pub fn free(reason: FreeShipping, tax_rule_id: TaxRuleId) -> Self {
        Self {
            price: Decimal::ZERO,
            tax_rule_id,
            area: None,
            free_shipping: Some(reason),
        }
    }

    /// Check if shipping was waived.
    pub fn is_free(&self) -> bool {
        self.free_shipping.is_some()
    }
}

/// Postage composed with the tax engine, as shown to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderPostage {
    pub amount: Decimal,
    pub amount_with_tax: Decimal,
    pub tax_rule_id: TaxRuleId,
}

impl OrderPostage {
    /// Postage with no tax rule applied.
    pub fn untaxed(amount: Decimal) -> Self {
        Self {
            amount,
            amount_with_tax: amount,
            tax_rule_id: TaxRuleId::Unset,
        }
    }

    /// Get the tax part of the postage.
    pub fn tax(&self) -> Decimal {
        self.amount_with_tax - self.amount
    }
}

/// Why the pickup method cannot deliver a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The first serviceable area cannot carry this weight.
    WeightExceeded {
        area: AreaId,
        weight: Decimal,
        max_weight: Decimal,
    },
    /// None of the destination's areas has a price list.
    CountryNotServed { destination: Destination },
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::WeightExceeded { weight, .. } => {
                write!(f, "unavailable for this cart weight ({} kg)", weight)
            }
            UnavailableReason::CountryNotServed { .. } => {
                write!(f, "unavailable for the chosen delivery country")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::area::CountryId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_to_cents_half_away_from_zero() {
        assert_eq!(round_to_cents(dec!(49.995)), dec!(50.00));
        assert_eq!(round_to_cents(dec!(49.985)), dec!(49.99));
        assert_eq!(round_to_cents(dec!(49.994999)), dec!(49.99));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let threshold = FreeShippingThreshold::new(dec!(50));
        assert!(threshold.applies_to(dec!(50.00)));
        assert!(threshold.applies_to(dec!(50.000001)));
        assert!(!threshold.applies_to(dec!(49.99)));
    }

    #[test]
    fn test_disabled_threshold_never_applies() {
        assert!(!FreeShippingThreshold::default().applies_to(dec!(0)));
        assert!(!FreeShippingThreshold::new(dec!(-5)).applies_to(dec!(10)));
    }

    #[test]
    fn test_free_quote() {
        let quote = DeliveryQuote::free(FreeShipping::Threshold, TaxRuleId::Id(3));
        assert!(quote.is_free());
        assert_eq!(quote.price, Decimal::ZERO);
        assert_eq!(quote.tax_rule_id, TaxRuleId::Id(3));
    }

    #[test]
    fn test_unavailable_reason_messages() {
        let exceeded = UnavailableReason::WeightExceeded {
            area: AreaId(1),
            weight: dec!(12),
            max_weight: dec!(10),
        };
        assert_eq!(exceeded.to_string(), "unavailable for this cart weight (12 kg)");

        let not_served = UnavailableReason::CountryNotServed {
            destination: Destination::country(CountryId(5)),
        };
        assert_eq!(
            not_served.to_string(),
            "unavailable for the chosen delivery country"
        );
    }

    #[test]
    fn test_order_postage_tax() {
        let postage = OrderPostage {
            amount: dec!(5.00),
            amount_with_tax: dec!(6.00),
            tax_rule_id: TaxRuleId::Id(1),
        };
        assert_eq!(postage.tax(), dec!(1.00));
        assert_eq!(OrderPostage::untaxed(dec!(4.90)).tax(), Decimal::ZERO);
    }
}
