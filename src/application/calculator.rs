//! Postage calculation.
//!
//! The calculator turns a destination, a cart weight and a cart amount into a
//! [`DeliveryQuote`]. Decision order:
//!
//! 1. shop-wide free shipping switch
//! 2. free shipping threshold on the cart's taxed amount
//! 3. the first serviceable area's tier table
//!
//! Only the first area with a price list is consulted. If the weight does not
//! fit there, the cart is rejected even if a later area could carry it.

use crate::application::area_resolver::AreaResolver;
use crate::application::config::ConfigFacade;
use crate::application::error::{ConfigError, DeliveryError, Result};
use crate::application::metrics::Metrics;
use crate::application::ports::FreeShippingSwitch;
use crate::application::price_table::PriceTable;
use crate::domain::area::{AreaId, Destination};
use crate::domain::index::PriceIndex;
use crate::domain::quote::{DeliveryQuote, FreeShipping, TaxRuleId, UnavailableReason};
use crate::domain::tier::{PriceTier, TierError};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Price a weight against the first serviceable area of `areas`.
///
/// Areas without a price list, or with an empty one, are skipped.
pub fn price_for_areas(
    index: &PriceIndex,
    areas: &[AreaId],
    destination: &Destination,
    weight: Decimal,
) -> std::result::Result<(AreaId, PriceTier), UnavailableReason> {
    let Some((area, tiers)) = areas
        .iter()
        .find_map(|area| index.serviceable(*area).map(|tiers| (*area, tiers)))
    else {
        return Err(UnavailableReason::CountryNotServed {
            destination: *destination,
        });
    };

    match tiers.select(weight) {
        Ok(tier) => Ok((area, *tier)),
        Err(TierError::WeightExceeded { weight, max_weight }) => {
            Err(UnavailableReason::WeightExceeded {
                area,
                weight,
                max_weight,
            })
        }
        // serviceable() never yields an empty table
        Err(TierError::Empty) => Err(UnavailableReason::CountryNotServed {
            destination: *destination,
        }),
    }
}

/// Computes quotes for the pickup delivery method.
#[derive(Debug, Clone)]
pub struct PostageCalculator {
    prices: Arc<PriceTable>,
    areas: AreaResolver,
    config: ConfigFacade,
    free_shipping_switch: Option<Arc<dyn FreeShippingSwitch>>,
    metrics: Metrics,
}

impl PostageCalculator {
    /// Create a calculator. Without a switch only the threshold can waive postage.
    pub fn new(
        prices: Arc<PriceTable>,
        areas: AreaResolver,
        config: ConfigFacade,
        free_shipping_switch: Option<Arc<dyn FreeShippingSwitch>>,
        metrics: Metrics,
    ) -> Self {
        Self {
            prices,
            areas,
            config,
            free_shipping_switch,
            metrics,
        }
    }

    /// Quote the raw postage for a cart.
    ///
    /// # Errors
    /// * [`DeliveryError::Unavailable`] when the destination is not served or
    ///   the weight exceeds the first serviceable area's heaviest tier
    /// * storage and configuration failures, propagated unchanged
    pub fn quote(
        &self,
        destination: &Destination,
        weight: Decimal,
        cart_taxed_amount: Decimal,
    ) -> Result<DeliveryQuote> {
        let result = self.compute(destination, weight, cart_taxed_amount);

        match &result {
            Ok(quote) => self.metrics.record_priced(quote.is_free()),
            Err(DeliveryError::Unavailable(reason)) => {
                self.metrics.record_unavailable();
                tracing::debug!(
                    destination = %destination,
                    weight = %weight,
                    reason = %reason,
                    "pickup delivery unavailable"
                );
            }
            Err(_) => {}
        }

        result
    }

    fn compute(
        &self,
        destination: &Destination,
        weight: Decimal,
        cart_taxed_amount: Decimal,
    ) -> Result<DeliveryQuote> {
        if let Some(switch) = &self.free_shipping_switch {
            if switch.is_active()? {
                tracing::debug!(destination = %destination, "free shipping switch is on");
                return Ok(DeliveryQuote::free(
                    FreeShipping::Switch,
                    self.free_quote_tax_rule()?,
                ));
            }
        }

        let threshold = self.config.free_shipping_threshold()?;
        if threshold.applies_to(cart_taxed_amount) {
            tracing::debug!(
                amount = %cart_taxed_amount,
                threshold = %threshold.amount(),
                "free shipping threshold reached"
            );
            return Ok(DeliveryQuote::free(
                FreeShipping::Threshold,
                self.free_quote_tax_rule()?,
            ));
        }

        let tax_rule_id = self.config.tax_rule_id()?;
        let index = self.prices.load()?;
        let areas = self.areas.areas_for(destination)?;
        let (area, tier) = price_for_areas(&index, &areas, destination, weight)?;

        tracing::debug!(
            area = %area,
            weight = %weight,
            weight_max = %tier.weight_max,
            price = %tier.price,
            "postage tier selected"
        );

        Ok(DeliveryQuote::priced(area, tier.price, tax_rule_id))
    }

    /// Tax rule attached to a waived quote.
    ///
    /// Tax on a zero price is zero, so an unparsable rule is logged and
    /// dropped instead of failing the quote.
    fn free_quote_tax_rule(&self) -> Result<TaxRuleId> {
        match self.config.tax_rule_id() {
            Ok(tax_rule_id) => Ok(tax_rule_id),
            Err(ConfigError::InvalidValue { key, value }) => {
                tracing::warn!(key, value = %value, "ignoring invalid tax rule on free quote");
                Ok(TaxRuleId::Unset)
            }
            Err(e) => Err(e.into()),
        }
    }
}
