//! The pickup delivery method, wired from its collaborators.
//!
//! [`PickupDeliveryService`] owns the price cache and exposes the
//! [`DeliveryModule`] capability set to the checkout flow.

use crate::application::{
    area_resolver::AreaResolver,
    calculator::PostageCalculator,
    config::ConfigFacade,
    delivery::{DeliveryMode, DeliveryModule, QuoteRequest},
    eligibility::EligibilityChecker,
    error::Result,
    metrics::Metrics,
    ports::{
        AreaMembershipStore, ConfigStore, FreeShippingSwitch, PriceTierStore, StoreError,
        TaxEngine,
    },
    price_table::PriceTable,
};
use crate::domain::area::{Destination, ModuleId};
use crate::domain::quote::{DeliveryQuote, OrderPostage};
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;

/// Error returned when building a [`PickupDeliveryService`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("a module id is required")]
    MissingModuleId,
    #[error("a price tier store is required")]
    MissingPriceStore,
    #[error("an area membership store is required")]
    MissingAreaStore,
    #[error("a configuration store is required")]
    MissingConfigStore,
}

/// Builder for constructing a [`PickupDeliveryService`].
#[derive(Default)]
pub struct PickupDeliveryServiceBuilder {
    module_id: Option<ModuleId>,
    price_store: Option<Arc<dyn PriceTierStore>>,
    area_store: Option<Arc<dyn AreaMembershipStore>>,
    config_store: Option<Arc<dyn ConfigStore>>,
    free_shipping_switch: Option<Arc<dyn FreeShippingSwitch>>,
    metrics: Option<Metrics>,
}

impl PickupDeliveryServiceBuilder {
    /// Set the id of this module in the host platform.
    ///
    /// Only areas enabled for this id are considered.
    pub fn with_module_id(mut self, module_id: ModuleId) -> Self {
        self.module_id = Some(module_id);
        self
    }

    /// Set the store the price table is read from.
    pub fn with_price_store(mut self, store: Arc<dyn PriceTierStore>) -> Self {
        self.price_store = Some(store);
        self
    }

    /// Set the store resolving destinations to areas.
    pub fn with_area_store(mut self, store: Arc<dyn AreaMembershipStore>) -> Self {
        self.area_store = Some(store);
        self
    }

    /// Set the store holding the module configuration.
    pub fn with_config_store(mut self, store: Arc<dyn ConfigStore>) -> Self {
        self.config_store = Some(store);
        self
    }

    /// Add a shop-wide free shipping switch. Without one, only the threshold
    /// can waive postage.
    pub fn with_free_shipping_switch(mut self, switch: Arc<dyn FreeShippingSwitch>) -> Self {
        self.free_shipping_switch = Some(switch);
        self
    }

    /// Share an existing metrics handle instead of creating a new one.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the service.
    ///
    /// # Errors
    /// Returns a [`BuildError`] naming the first missing collaborator.
    pub fn build(self) -> std::result::Result<PickupDeliveryService, BuildError> {
        let module_id = self.module_id.ok_or(BuildError::MissingModuleId)?;
        let price_store = self.price_store.ok_or(BuildError::MissingPriceStore)?;
        let area_store = self.area_store.ok_or(BuildError::MissingAreaStore)?;
        let config_store = self.config_store.ok_or(BuildError::MissingConfigStore)?;
        let metrics = self.metrics.unwrap_or_default();

        let prices = Arc::new(PriceTable::new(price_store, metrics.clone()));
        let areas = AreaResolver::new(area_store, module_id);
        let config = ConfigFacade::new(config_store);

        let calculator = PostageCalculator::new(
            Arc::clone(&prices),
            areas.clone(),
            config.clone(),
            self.free_shipping_switch,
            metrics.clone(),
        );
        let eligibility = EligibilityChecker::new(Arc::clone(&prices), areas);

        Ok(PickupDeliveryService {
            module_id,
            prices,
            config,
            calculator,
            eligibility,
            metrics,
        })
    }
}

/// Pickup-point delivery method.
///
/// # Example
/// ```
/// use pickup_postage::{
///     AreaId, CountryId, DeliveryModule, Destination, InMemoryAreaStore,
///     InMemoryConfigStore, InMemoryPriceStore, ModuleId, PickupDeliveryService, PriceRow,
///     QuoteRequest,
/// };
/// use rust_decimal::Decimal;
/// use std::sync::Arc;
///
/// let prices = InMemoryPriceStore::new(vec![PriceRow {
///     area_id: AreaId(1),
///     weight_max: Decimal::new(5, 0),
///     price: Decimal::new(490, 2),
///     area_name: "France".to_string(),
/// }]);
/// let areas = InMemoryAreaStore::new();
/// areas.add_country(AreaId(1), CountryId(64));
/// areas.enable(AreaId(1), ModuleId(12));
///
/// let service = PickupDeliveryService::builder()
///     .with_module_id(ModuleId(12))
///     .with_price_store(Arc::new(prices))
///     .with_area_store(Arc::new(areas))
///     .with_config_store(Arc::new(InMemoryConfigStore::new()))
///     .build()
///     .unwrap();
///
/// let france = Destination::country(CountryId(64));
/// let quote = service
///     .quote(&QuoteRequest::new(france, Decimal::new(2, 0), Decimal::new(30, 0)))
///     .unwrap();
/// assert_eq!(quote.price, Decimal::new(490, 2));
/// assert!(service.is_eligible(&france, Decimal::new(5, 0)).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct PickupDeliveryService {
    module_id: ModuleId,
    prices: Arc<PriceTable>,
    config: ConfigFacade,
    calculator: PostageCalculator,
    eligibility: EligibilityChecker,
    metrics: Metrics,
}

impl PickupDeliveryService {
    /// Create a builder for configuring the service.
    pub fn builder() -> PickupDeliveryServiceBuilder {
        PickupDeliveryServiceBuilder::default()
    }

    /// Get the id of this module.
    pub fn module_id(&self) -> ModuleId {
        self.module_id
    }

    /// Typed configuration of the module.
    pub fn config(&self) -> &ConfigFacade {
        &self.config
    }

    /// The shared price cache, for refresh after the price table changes.
    pub fn price_table(&self) -> &PriceTable {
        &self.prices
    }

    /// Get observability metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Quote and apply the configured tax rule.
    ///
    /// Without a tax rule the raw price is used as is and the tax engine is
    /// not called.
    pub fn postage(
        &self,
        request: &QuoteRequest,
        tax_engine: &dyn TaxEngine,
    ) -> Result<OrderPostage> {
        let quote = self.quote(request)?;
        if !quote.tax_rule_id.is_set() {
            return Ok(OrderPostage::untaxed(quote.price));
        }

        let amount_with_tax = tax_engine.apply_tax_rule(
            quote.price,
            quote.tax_rule_id,
            &request.destination,
            &request.locale,
        )?;

        Ok(OrderPostage {
            amount: quote.price,
            amount_with_tax,
            tax_rule_id: quote.tax_rule_id,
        })
    }
}

impl DeliveryModule for PickupDeliveryService {
    fn quote(&self, request: &QuoteRequest) -> Result<DeliveryQuote> {
        self.calculator.quote(
            &request.destination,
            request.weight,
            request.cart_taxed_amount,
        )
    }

    fn is_eligible(
        &self,
        destination: &Destination,
        weight: Decimal,
    ) -> std::result::Result<bool, StoreError> {
        self.eligibility.is_eligible(destination, weight)
    }

    fn delivery_mode(&self) -> DeliveryMode {
        DeliveryMode::Pickup
    }
}
