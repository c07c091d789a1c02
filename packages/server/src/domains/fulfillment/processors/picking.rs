//! Picking processors - pick list start and completion.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use turnstile::{ProcessContext, ProcessError, ProcessOutcome, Processor};

use crate::domains::fulfillment::models::FulfillmentOrder;
use crate::kernel::ServerDeps;

pub struct StartPickingProcessor;

#[async_trait]
impl Processor<FulfillmentOrder, ServerDeps> for StartPickingProcessor {
    fn name(&self) -> &'static str {
        "StartPickingProcessor"
    }

    async fn process(
        &self,
        mut order: FulfillmentOrder,
        _ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<FulfillmentOrder>, ProcessError> {
        order.picking_started_at = Some(Utc::now());

        let pick_list: Vec<String> = order
            .lines
            .iter()
            .map(|l| format!("{} x{}", l.sku, l.quantity))
            .collect();
        info!(
            reference = %order.reference,
            units = order.total_units(),
            pick_list = %pick_list.join(", "),
            "Picking started"
        );
        Ok(ProcessOutcome::new(order))
    }
}

pub struct FinishPickingProcessor;

#[async_trait]
impl Processor<FulfillmentOrder, ServerDeps> for FinishPickingProcessor {
    fn name(&self) -> &'static str {
        "FinishPickingProcessor"
    }

    async fn process(
        &self,
        mut order: FulfillmentOrder,
        _ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<FulfillmentOrder>, ProcessError> {
        order.picked_at = Some(Utc::now());
        info!(reference = %order.reference, "Picking finished; staged for dispatch");
        Ok(ProcessOutcome::new(order))
    }
}
