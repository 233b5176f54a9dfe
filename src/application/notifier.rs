//! Customer notification when a pickup shipment leaves the shop.

use crate::application::ports::{ConfigStore, MailError, Mailer, MessageParams, StoreError};
use crate::domain::area::ModuleId;
use crate::domain::order::{OrderStatus, ShipmentUpdate};
use std::sync::Arc;
use thiserror::Error;

/// Shop-level configuration key holding the sender address of shop emails.
pub const STORE_EMAIL: &str = "store_email";

/// Name of the message template sent to the customer.
pub const SHIPPED_MESSAGE: &str = "order_confirmation_icirelais";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("message template {0:?} is not installed")]
    MissingMessage(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Mail(#[from] MailError),
}

/// What happened to a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    Sent,
    /// The order ships with another delivery module
    OtherModule,
    /// The new status is not "sent"
    NotShipped,
    /// The shop has no sender address configured
    NoStoreEmail,
}

/// Sends the "your parcel is on its way" email for pickup orders.
#[derive(Debug, Clone)]
pub struct ShipmentNotifier {
    module: ModuleId,
    shop_config: Arc<dyn ConfigStore>,
    mailer: Arc<dyn Mailer>,
}

impl ShipmentNotifier {
    /// `shop_config` is the shop-wide store, not the module's own one.
    pub fn new(
        module: ModuleId,
        shop_config: Arc<dyn ConfigStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            module,
            shop_config,
            mailer,
        }
    }

    /// React to an order status change.
    pub fn on_status_update(
        &self,
        update: &ShipmentUpdate,
    ) -> Result<NotificationOutcome, NotifyError> {
        if update.delivery_module_id != self.module {
            return Ok(NotificationOutcome::OtherModule);
        }
        if update.status != OrderStatus::Sent {
            return Ok(NotificationOutcome::NotShipped);
        }

        let store_email = self
            .shop_config
            .get(STORE_EMAIL)?
            .filter(|email| !email.trim().is_empty());
        if store_email.is_none() {
            tracing::debug!(order = update.order_id, "no store email, skipping notification");
            return Ok(NotificationOutcome::NoStoreEmail);
        }

        if !self.mailer.message_exists(SHIPPED_MESSAGE)? {
            return Err(NotifyError::MissingMessage(SHIPPED_MESSAGE));
        }

        self.mailer
            .send_to_customer(SHIPPED_MESSAGE, update.customer_id, &message_params(update))?;

        tracing::info!(
            order = update.order_id,
            order_ref = %update.order_ref,
            customer = update.customer_id,
            "shipment notification sent"
        );
        Ok(NotificationOutcome::Sent)
    }
}

fn message_params(update: &ShipmentUpdate) -> MessageParams {
    MessageParams::from([
        ("order_id", update.order_id.to_string()),
        ("order_ref", update.order_ref.clone()),
        ("order_date", update.created_at.to_rfc3339()),
        ("update_date", update.updated_at.to_rfc3339()),
        ("package", update.delivery_ref.clone().unwrap_or_default()),
    ])
}
