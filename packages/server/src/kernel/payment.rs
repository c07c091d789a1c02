//! Simulated payment authorization with a fixed amount ceiling.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use super::{BasePaymentGateway, PaymentDecision};

pub struct SimulatedPaymentGateway {
    ceiling: f64,
}

impl SimulatedPaymentGateway {
    pub fn new(ceiling: f64) -> Self {
        Self { ceiling }
    }
}

#[async_trait]
impl BasePaymentGateway for SimulatedPaymentGateway {
    async fn authorize(&self, reference: &str, amount: f64) -> Result<PaymentDecision> {
        if amount <= 0.0 {
            return Ok(PaymentDecision {
                approved: false,
                transaction_id: None,
                reason: Some("amount must be positive".to_string()),
            });
        }
        if amount > self.ceiling {
            info!(reference, amount, ceiling = self.ceiling, "Payment declined over ceiling");
            return Ok(PaymentDecision {
                approved: false,
                transaction_id: None,
                reason: Some(format!(
                    "amount {:.2} exceeds authorization ceiling {:.2}",
                    amount, self.ceiling
                )),
            });
        }

        let transaction_id = format!("txn-{}", Uuid::new_v4());
        info!(reference, amount, %transaction_id, "Payment authorized");
        Ok(PaymentDecision {
            approved: true,
            transaction_id: Some(transaction_id),
            reason: None,
        })
    }
}
