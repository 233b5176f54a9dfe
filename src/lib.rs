//! # pickup-postage
//!
//! Postage engine for a pickup-point delivery method.
//!
//! Given a destination (country, optional state), a cart weight and the cart's
//! taxed amount, the engine answers with a [`DeliveryQuote`]: a raw postage
//! price, a free-shipping waiver, or the reason the method cannot carry the
//! cart. Prices come from a per-area table of weight tiers that is read from
//! storage once and cached for the life of the process.
//!
//! ## Quick Start
//!
//! ```rust
//! use pickup_postage::{
//!     AreaId, CountryId, DeliveryModule, Destination, InMemoryAreaStore, InMemoryConfigStore,
//!     InMemoryPriceStore, ModuleId, PickupDeliveryService, PriceRow, QuoteRequest,
//! };
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! let row = |weight_max: i64, cents: i64| PriceRow {
//!     area_id: AreaId(1),
//!     weight_max: Decimal::new(weight_max, 0),
//!     price: Decimal::new(cents, 2),
//!     area_name: "France".to_string(),
//! };
//! let prices = InMemoryPriceStore::new(vec![row(1, 490), row(5, 750), row(20, 1290)]);
//!
//! let areas = InMemoryAreaStore::new();
//! areas.add_country(AreaId(1), CountryId(64));
//! areas.enable(AreaId(1), ModuleId(12));
//!
//! let config = InMemoryConfigStore::with_values([("free_shipping_amount", "60")]);
//!
//! let service = PickupDeliveryService::builder()
//!     .with_module_id(ModuleId(12))
//!     .with_price_store(Arc::new(prices))
//!     .with_area_store(Arc::new(areas))
//!     .with_config_store(Arc::new(config))
//!     .build()
//!     .unwrap();
//!
//! let france = Destination::country(CountryId(64));
//!
//! // 3 kg falls in the "up to 5 kg" tier
//! let quote = service
//!     .quote(&QuoteRequest::new(france, Decimal::new(3, 0), Decimal::new(25, 0)))
//!     .unwrap();
//! assert_eq!(quote.price, Decimal::new(750, 2));
//!
//! // Carts of 60 or more ship free
//! let quote = service
//!     .quote(&QuoteRequest::new(france, Decimal::new(3, 0), Decimal::new(60, 0)))
//!     .unwrap();
//! assert!(quote.is_free());
//!
//! // Nothing carries 25 kg
//! let err = service
//!     .quote(&QuoteRequest::new(france, Decimal::new(25, 0), Decimal::new(25, 0)))
//!     .unwrap_err();
//! assert!(err.is_unavailable());
//! ```
//!
//! ## Decision order
//!
//! 1. The shop-wide free shipping switch, when one is configured
//! 2. The free shipping threshold (`free_shipping_amount`; zero disables it)
//! 3. The tier table of the **first** area that contains the destination, is
//!    enabled for the module, and has at least one tier
//!
//! A cart heavier than that area's heaviest tier is rejected even if a later
//! area could carry it.
//!
//! ## Price cache
//!
//! [`PriceTable`] builds the [`PriceIndex`] on first use. Concurrent cold
//! readers cause one storage fetch. Use [`PriceTable::refresh`] or
//! [`PriceTable::invalidate`] after the price table changes in storage.
//!
//! ## Observability
//!
//! The engine logs through `tracing` and counts quotes in [`Metrics`]:
//!
//! ```rust
//! # use pickup_postage::*;
//! # use std::sync::Arc;
//! # let service = PickupDeliveryService::builder()
//! #     .with_module_id(ModuleId(1))
//! #     .with_price_store(Arc::new(InMemoryPriceStore::default()))
//! #     .with_area_store(Arc::new(InMemoryAreaStore::new()))
//! #     .with_config_store(Arc::new(InMemoryConfigStore::new()))
//! #     .build()
//! #     .unwrap();
//! let snapshot = service.metrics().snapshot();
//! println!(
//!     "quotes: {} ({} free, {:.1}% unavailable), price table builds: {}",
//!     snapshot.total_quotes(),
//!     snapshot.quotes_free,
//!     snapshot.unavailable_rate() * 100.0,
//!     snapshot.price_table_builds,
//! );
//! ```

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    area::{AreaId, CountryId, Destination, ModuleId, StateId},
    index::{AreaPrices, PriceIndex, PriceRow},
    order::{OrderStatus, ShipmentUpdate, StatusChange},
    quote::{
        DeliveryQuote, FreeShipping, FreeShippingThreshold, OrderPostage, TaxRuleId,
        UnavailableReason,
    },
    tier::{PriceTier, TierError, TierTable},
};

pub use application::{
    area_resolver::AreaResolver,
    calculator::{price_for_areas, PostageCalculator},
    config::{ConfigFacade, ReturnAddress, ReturnType, SenderAddress},
    delivery::{DeliveryMode, DeliveryModule, QuoteRequest},
    eligibility::EligibilityChecker,
    error::{ConfigError, DeliveryError},
    metrics::{Metrics, MetricsSnapshot},
    notifier::{NotificationOutcome, NotifyError, ShipmentNotifier},
    ports::{
        AreaMembershipStore, ConfigStore, FreeShippingSwitch, MailError, Mailer, MessageParams,
        PriceTierStore, StoreError, TaxEngine, TaxError,
    },
    price_table::PriceTable,
};

pub use infrastructure::{
    service::{BuildError, PickupDeliveryService, PickupDeliveryServiceBuilder},
    storage::{FreeShippingFlag, InMemoryAreaStore, InMemoryConfigStore, InMemoryPriceStore},
};
