//! Doubles for the host platform's mailer and tax engine.

use crate::application::ports::{MailError, Mailer, MessageParams, TaxEngine, TaxError};
use crate::domain::area::Destination;
use crate::domain::quote::{round_to_cents, TaxRuleId};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A message handed to [`RecordingMailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub name: String,
    pub customer_id: u64,
    pub params: MessageParams,
}

/// Mailer that records messages instead of sending them.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    templates: BTreeSet<String>,
    sent: Mutex<Vec<SentMessage>>,
    failure: Option<String>,
}

impl RecordingMailer {
    /// A mailer knowing the given message templates.
    pub fn with_templates<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            templates: templates.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Make every send fail with `message`.
    pub fn failing_with(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }
}

impl Mailer for RecordingMailer {
    fn message_exists(&self, name: &str) -> Result<bool, MailError> {
        Ok(self.templates.contains(name))
    }

    fn send_to_customer(
        &self,
        name: &str,
        customer_id: u64,
        params: &MessageParams,
    ) -> Result<(), MailError> {
        if let Some(message) = &self.failure {
            return Err(MailError(message.clone()));
        }
        self.sent.lock().push(SentMessage {
            name: name.to_string(),
            customer_id,
            params: params.clone(),
        });
        Ok(())
    }
}

/// Tax engine applying one flat rate to every rule.
#[derive(Debug)]
pub struct FixedRateTaxEngine {
    rate: Decimal,
    calls: AtomicUsize,
}

impl FixedRateTaxEngine {
    /// `rate` is a fraction, e.g. `0.20` for 20%.
    pub fn new(rate: Decimal) -> Self {
        Self {
            rate,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TaxEngine for FixedRateTaxEngine {
    fn apply_tax_rule(
        &self,
        amount: Decimal,
        tax_rule_id: TaxRuleId,
        _destination: &Destination,
        _locale: &str,
    ) -> Result<Decimal, TaxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !tax_rule_id.is_set() {
            return Err(TaxError {
                tax_rule_id,
                message: "no tax rule".to_string(),
            });
        }
        Ok(round_to_cents(amount * (Decimal::ONE + self.rate)))
    }
}
