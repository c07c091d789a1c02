//! Delivery completion - the best-effort end of the pet/order coupling.
//!
//! The pet's `complete_sale` sync is explicitly secondary: if it fails, the
//! order still completes, and the failed attempt is recorded in the outcome.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use turnstile::{
    LifecycleEntity, Mode, ProcessContext, ProcessError, ProcessOutcome, Processor,
};

use crate::domains::orders::models::{Order, OrderStatus};
use crate::domains::pets::models::Pet;
use crate::kernel::ServerDeps;

pub struct CompleteDeliveryProcessor;

#[async_trait]
impl Processor<Order, ServerDeps> for CompleteDeliveryProcessor {
    fn name(&self) -> &'static str {
        "CompleteDeliveryProcessor"
    }

    async fn process(
        &self,
        mut order: Order,
        ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<Order>, ProcessError> {
        order.status = OrderStatus::Delivered;
        order.delivered_at = Some(Utc::now());
        order.complete = true;

        let mut secondary = Vec::new();
        ctx.related(Pet::KIND, order.pet_id)
            .transition("complete_sale", Mode::BestEffort, &mut secondary)
            .await?;

        info!(
            order_id = %order.id,
            pet_id = %order.pet_id,
            pet_sync_ok = secondary.iter().all(|a| a.succeeded()),
            "Order delivered"
        );
        Ok(ProcessOutcome::with_secondary(order, secondary))
    }
}
