use pickup_postage::{
    ConfigError, ConfigFacade, ConfigStore, InMemoryConfigStore, ReturnAddress, ReturnType,
    SenderAddress, TaxRuleId,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn facade() -> (Arc<InMemoryConfigStore>, ConfigFacade) {
    let store = Arc::new(InMemoryConfigStore::new());
    (store.clone(), ConfigFacade::new(store))
}

#[test]
fn test_fresh_install_defaults() {
    let (store, config) = facade();
    config.initialize().unwrap();

    assert_eq!(store.get("dpd_pickup_point_tax_rule_id").unwrap().as_deref(), Some(""));
    assert_eq!(config.tax_rule_id().unwrap(), TaxRuleId::Unset);
    assert_eq!(config.free_shipping_amount().unwrap(), Decimal::ZERO);
    assert!(!config.free_shipping_threshold().unwrap().is_enabled());
    assert!(config.excluded_zip_codes().unwrap().is_empty());
    assert_eq!(config.map_api_key().unwrap(), None);
    assert_eq!(config.sender_address().unwrap(), SenderAddress::default());
    assert_eq!(config.return_type().unwrap(), ReturnType::None);
}

#[test]
fn test_initialize_keeps_existing_tax_rule() {
    let (_, config) = facade();
    config.set_tax_rule_id(TaxRuleId::Id(3)).unwrap();
    config.initialize().unwrap();

    assert_eq!(config.tax_rule_id().unwrap(), TaxRuleId::Id(3));
}

#[test]
fn test_free_shipping_amount_round_trip() {
    let (store, config) = facade();
    config.set_free_shipping_amount(dec!(49.90)).unwrap();

    assert_eq!(store.get("free_shipping_amount").unwrap().as_deref(), Some("49.90"));
    assert_eq!(config.free_shipping_amount().unwrap(), dec!(49.90));
}

#[test]
fn test_excluded_zip_codes() {
    let (store, config) = facade();
    config
        .set_excluded_zip_codes(&["20000", " 20090 ", "", "98000"])
        .unwrap();

    assert_eq!(
        store.get("exclude_zip_code").unwrap().as_deref(),
        Some("20000,20090,98000")
    );
    assert_eq!(config.excluded_zip_codes().unwrap(), vec!["20000", "20090", "98000"]);
    assert!(config.is_zip_code_excluded("20090").unwrap());
    assert!(!config.is_zip_code_excluded("75001").unwrap());
}

#[test]
fn test_invalid_values_are_reported() {
    let store = Arc::new(InMemoryConfigStore::with_values([
        ("free_shipping_amount", "fifty"),
        ("dpd_pickup_point_tax_rule_id", "-1"),
    ]));
    let config = ConfigFacade::new(store);

    assert_eq!(
        config.free_shipping_amount().unwrap_err(),
        ConfigError::InvalidValue {
            key: "free_shipping_amount",
            value: "fifty".to_string(),
        }
    );
    assert!(matches!(
        config.tax_rule_id().unwrap_err(),
        ConfigError::InvalidValue { key: "dpd_pickup_point_tax_rule_id", .. }
    ));
}

#[test]
fn test_sender_and_return_blocks() {
    let (store, config) = facade();
    let sender = SenderAddress {
        name: "Boutique".to_string(),
        address: "1 rue de la Paix".to_string(),
        zip_code: "75002".to_string(),
        city: "Paris".to_string(),
        email: "shop@example.com".to_string(),
        carrier_code: "EXA42".to_string(),
        ..SenderAddress::default()
    };
    let returns = ReturnAddress {
        name: "Returns".to_string(),
        city: "Lyon".to_string(),
        ..ReturnAddress::default()
    };

    config.set_sender_address(&sender).unwrap();
    config.set_return_address(&returns).unwrap();
    config.set_return_type(ReturnType::Prepared).unwrap();

    assert_eq!(store.get("conf_exa_city").unwrap().as_deref(), Some("Paris"));
    assert_eq!(store.get("conf_exa_expcode").unwrap().as_deref(), Some("EXA42"));
    assert_eq!(store.get("return_city").unwrap().as_deref(), Some("Lyon"));
    assert_eq!(store.get("return_type").unwrap().as_deref(), Some("4"));

    assert_eq!(config.sender_address().unwrap(), sender);
    assert_eq!(config.return_address().unwrap(), returns);
    assert_eq!(config.return_type().unwrap(), ReturnType::Prepared);
}
