//! Shipment preparation - restock heuristics and staff notification.

use async_trait::async_trait;
use tracing::info;
use turnstile::{ProcessContext, ProcessError, ProcessOutcome, Processor};

use crate::domains::orders::models::{Order, OrderStatus};
use crate::kernel::ServerDeps;

/// Orders at or above this size trigger a restock suggestion.
const RESTOCK_TRIGGER_QUANTITY: u32 = 3;

pub struct PrepareShipmentProcessor;

#[async_trait]
impl Processor<Order, ServerDeps> for PrepareShipmentProcessor {
    fn name(&self) -> &'static str {
        "PrepareShipmentProcessor"
    }

    async fn process(
        &self,
        mut order: Order,
        _ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<Order>, ProcessError> {
        order.status = OrderStatus::Processing;

        // Simple heuristic: big orders suggest demand, so restock double.
        order.restock_quantity = if order.quantity >= RESTOCK_TRIGGER_QUANTITY {
            Some(order.quantity * 2)
        } else {
            Some(0)
        };

        // Log-only notification; no durable delivery guarantee.
        info!(
            order_id = %order.id,
            quantity = order.quantity,
            restock = ?order.restock_quantity,
            "Notifying staff: order is ready for fulfillment"
        );
        Ok(ProcessOutcome::new(order))
    }
}
