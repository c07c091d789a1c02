//! Delivery confirmation for the warehouse schema.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use turnstile::{ProcessContext, ProcessError, ProcessOutcome, Processor};

use crate::domains::fulfillment::models::FulfillmentOrder;
use crate::kernel::ServerDeps;

pub struct ConfirmDeliveryProcessor;

#[async_trait]
impl Processor<FulfillmentOrder, ServerDeps> for ConfirmDeliveryProcessor {
    fn name(&self) -> &'static str {
        "ConfirmDeliveryProcessor"
    }

    async fn process(
        &self,
        mut order: FulfillmentOrder,
        _ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<FulfillmentOrder>, ProcessError> {
        if order.delivered_at.is_none() {
            order.delivered_at = Some(Utc::now());
        }
        info!(reference = %order.reference, delivered_at = ?order.delivered_at, "Delivery confirmed");
        Ok(ProcessOutcome::new(order))
    }
}
