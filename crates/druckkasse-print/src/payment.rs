// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Payment settlement.
//
// The kiosk does not take real money. `SimulatedSettlement` waits a fixed
// delay and always succeeds; the trait exists so a terminal integration can
// replace it without touching the workflow.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use druckkasse_core::error::Result;
use druckkasse_core::pricing::PricingQuote;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

/// Proof that a quote was paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub id: Uuid,
    pub amount: Decimal,
    pub settled_at: DateTime<Utc>,
}

/// Something that can settle a pricing quote.
///
/// Returns `DruckkasseError::SettlementDeclined` when the payment does not go
/// through; the workflow goes back to waiting for payment in that case.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn settle(&self, quote: &PricingQuote) -> Result<PaymentReceipt>;
}

/// Provider that settles every quote after a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedSettlement {
    delay: Duration,
}

impl SimulatedSettlement {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PaymentProvider for SimulatedSettlement {
    async fn settle(&self, quote: &PricingQuote) -> Result<PaymentReceipt> {
        tokio::time::sleep(self.delay).await;
        let receipt = PaymentReceipt {
            id: Uuid::new_v4(),
            amount: quote.total,
            settled_at: Utc::now(),
        };
        info!(receipt = %receipt.id, amount = %receipt.amount, "simulated payment settled");
        Ok(receipt)
    }
}
