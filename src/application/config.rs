//! Typed access to the module's configuration scalars.
//!
//! Missing keys are never errors: amounts default to zero, identifiers to
//! their unset form, text to empty. Values that are present but cannot be
//! parsed are reported as [`ConfigError::InvalidValue`].

use crate::application::error::ConfigError;
use crate::application::ports::ConfigStore;
use crate::domain::quote::{FreeShippingThreshold, TaxRuleId};
use crate::domain::zip_codes;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

pub const FREE_SHIPPING_AMOUNT: &str = "free_shipping_amount";
pub const EXCLUDE_ZIP_CODE: &str = "exclude_zip_code";
pub const GOOGLE_MAP_KEY: &str = "google_map_key";
pub const TAX_RULE_ID: &str = "dpd_pickup_point_tax_rule_id";
pub const RETURN_TYPE: &str = "return_type";

/// Keys of the sender ("expeditor") block, in [`SenderAddress`] field order.
const SENDER_KEYS: [&str; 9] = [
    "conf_exa_name",
    "conf_exa_addr",
    "conf_exa_addr2",
    "conf_exa_zipcode",
    "conf_exa_city",
    "conf_exa_tel",
    "conf_exa_mobile",
    "conf_exa_mail",
    "conf_exa_expcode",
];

/// Keys of the return address block, in [`ReturnAddress`] field order.
const RETURN_KEYS: [&str; 6] = [
    "return_name",
    "return_addr",
    "return_addr2",
    "return_zipcode",
    "return_city",
    "return_tel",
];

/// Shop address printed as sender on parcel labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenderAddress {
    pub name: String,
    pub address: String,
    pub address2: String,
    pub zip_code: String,
    pub city: String,
    pub phone: String,
    pub mobile: String,
    pub email: String,
    /// Shipper account code at the carrier
    pub carrier_code: String,
}

/// Where customers send parcels back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnAddress {
    pub name: String,
    pub address: String,
    pub address2: String,
    pub zip_code: String,
    pub city: String,
    pub phone: String,
}

/// Return service offered with each parcel, stored as the carrier's code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnType {
    #[default]
    None,
    OnDemand,
    Prepared,
}

impl ReturnType {
    /// Get the carrier code.
    pub fn code(&self) -> u8 {
        match self {
            ReturnType::None => 0,
            ReturnType::OnDemand => 3,
            ReturnType::Prepared => 4,
        }
    }

    /// Map a carrier code back to a return type.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ReturnType::None),
            3 => Some(ReturnType::OnDemand),
            4 => Some(ReturnType::Prepared),
            _ => None,
        }
    }
}

/// Typed facade over a [`ConfigStore`].
#[derive(Debug, Clone)]
pub struct ConfigFacade {
    store: Arc<dyn ConfigStore>,
}

impl ConfigFacade {
    /// Create a facade over `store`.
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Activation hook: make sure the tax rule key exists.
    pub fn initialize(&self) -> Result<(), ConfigError> {
        if self.raw(TAX_RULE_ID)?.is_none() {
            self.store.set(TAX_RULE_ID, "")?;
        }
        Ok(())
    }

    /// Get the free shipping amount, `0` when unset.
    pub fn free_shipping_amount(&self) -> Result<Decimal, ConfigError> {
        match self.non_empty(FREE_SHIPPING_AMOUNT)? {
            None => Ok(Decimal::ZERO),
            Some(value) => {
                Decimal::from_str(value.trim()).map_err(|_| ConfigError::InvalidValue {
                    key: FREE_SHIPPING_AMOUNT,
                    value,
                })
            }
        }
    }

    /// Get the free shipping amount as a threshold.
    pub fn free_shipping_threshold(&self) -> Result<FreeShippingThreshold, ConfigError> {
        self.free_shipping_amount().map(FreeShippingThreshold::new)
    }

    /// Store the free shipping amount.
    pub fn set_free_shipping_amount(&self, amount: Decimal) -> Result<(), ConfigError> {
        Ok(self.store.set(FREE_SHIPPING_AMOUNT, &amount.to_string())?)
    }

    /// Get the excluded zip codes, empty when unset.
    pub fn excluded_zip_codes(&self) -> Result<Vec<String>, ConfigError> {
        Ok(self
            .raw(EXCLUDE_ZIP_CODE)?
            .map(|stored| zip_codes::reverse_transform(&stored))
            .unwrap_or_default())
    }

    /// Store the excluded zip codes. Blank codes are dropped.
    pub fn set_excluded_zip_codes<S: AsRef<str>>(&self, codes: &[S]) -> Result<(), ConfigError> {
        Ok(self
            .store
            .set(EXCLUDE_ZIP_CODE, &zip_codes::transform(codes))?)
    }

    /// Check if a zip code is excluded, ignoring ASCII case.
    pub fn is_zip_code_excluded(&self, zip_code: &str) -> Result<bool, ConfigError> {
        let zip_code = zip_code.trim();
        Ok(self
            .excluded_zip_codes()?
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(zip_code)))
    }

    /// Get the map service API key, if set.
    pub fn map_api_key(&self) -> Result<Option<String>, ConfigError> {
        self.non_empty(GOOGLE_MAP_KEY)
    }

    /// Store the map service API key.
    pub fn set_map_api_key(&self, key: &str) -> Result<(), ConfigError> {
        Ok(self.store.set(GOOGLE_MAP_KEY, key)?)
    }

    /// The tax rule to apply to postage; [`TaxRuleId::Unset`] when absent.
    pub fn tax_rule_id(&self) -> Result<TaxRuleId, ConfigError> {
        match self.non_empty(TAX_RULE_ID)? {
            None => Ok(TaxRuleId::Unset),
            Some(value) => value
                .trim()
                .parse::<u32>()
                .map(TaxRuleId::Id)
                .map_err(|_| ConfigError::InvalidValue {
                    key: TAX_RULE_ID,
                    value,
                }),
        }
    }

    /// Store the tax rule. [`TaxRuleId::Unset`] is stored as an empty value.
    pub fn set_tax_rule_id(&self, tax_rule_id: TaxRuleId) -> Result<(), ConfigError> {
        let value = match tax_rule_id {
            TaxRuleId::Unset => String::new(),
            TaxRuleId::Id(id) => id.to_string(),
        };
        Ok(self.store.set(TAX_RULE_ID, &value)?)
    }

    /// Get the sender block. Missing fields are empty.
    pub fn sender_address(&self) -> Result<SenderAddress, ConfigError> {
        let [name, address, address2, zip_code, city, phone, mobile, email, carrier_code] =
            self.block(SENDER_KEYS)?;
        Ok(SenderAddress {
            name,
            address,
            address2,
            zip_code,
            city,
            phone,
            mobile,
            email,
            carrier_code,
        })
    }

    /// Store every field of the sender block.
    pub fn set_sender_address(&self, sender: &SenderAddress) -> Result<(), ConfigError> {
        let values = [
            &sender.name,
            &sender.address,
            &sender.address2,
            &sender.zip_code,
            &sender.city,
            &sender.phone,
            &sender.mobile,
            &sender.email,
            &sender.carrier_code,
        ];
        self.set_block(&SENDER_KEYS, &values)
    }

    /// Get the return address block. Missing fields are empty.
    pub fn return_address(&self) -> Result<ReturnAddress, ConfigError> {
        let [name, address, address2, zip_code, city, phone] = self.block(RETURN_KEYS)?;
        Ok(ReturnAddress {
            name,
            address,
            address2,
            zip_code,
            city,
            phone,
        })
    }

    /// Store every field of the return address block.
    pub fn set_return_address(&self, address: &ReturnAddress) -> Result<(), ConfigError> {
        let values = [
            &address.name,
            &address.address,
            &address.address2,
            &address.zip_code,
            &address.city,
            &address.phone,
        ];
        self.set_block(&RETURN_KEYS, &values)
    }

    /// Get the return type, [`ReturnType::None`] when unset.
    pub fn return_type(&self) -> Result<ReturnType, ConfigError> {
        match self.non_empty(RETURN_TYPE)? {
            None => Ok(ReturnType::None),
            Some(value) => value
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(ReturnType::from_code)
                .ok_or(ConfigError::InvalidValue {
                    key: RETURN_TYPE,
                    value,
                }),
        }
    }

    /// Store the return type as its carrier code.
    pub fn set_return_type(&self, return_type: ReturnType) -> Result<(), ConfigError> {
        Ok(self
            .store
            .set(RETURN_TYPE, &return_type.code().to_string())?)
    }

    fn raw(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.store.get(key)?)
    }

    fn non_empty(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.raw(key)?.filter(|value| !value.trim().is_empty()))
    }

    fn block<const N: usize>(&self, keys: [&str; N]) -> Result<[String; N], ConfigError> {
        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        for (slot, key) in values.iter_mut().zip(keys) {
            *slot = self.raw(key)?.unwrap_or_default();
        }
        Ok(values)
    }

    fn set_block(&self, keys: &[&str], values: &[&String]) -> Result<(), ConfigError> {
        for (key, value) in keys.iter().zip(values) {
            self.store.set(key, value)?;
        }
        Ok(())
    }
}
