//! Shipment dispatch - courier assignment and tracking.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use turnstile::{ProcessContext, ProcessError, ProcessOutcome, Processor};

use crate::domains::fulfillment::models::FulfillmentOrder;
use crate::kernel::ServerDeps;

const DEFAULT_COURIER: &str = "Maple Express";

pub struct DispatchShipmentProcessor;

#[async_trait]
impl Processor<FulfillmentOrder, ServerDeps> for DispatchShipmentProcessor {
    fn name(&self) -> &'static str {
        "DispatchShipmentProcessor"
    }

    async fn process(
        &self,
        mut order: FulfillmentOrder,
        ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<FulfillmentOrder>, ProcessError> {
        let courier = ctx
            .params
            .pointer("/shipment_data/courier")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_COURIER);
        order.courier = Some(courier.to_string());

        let id_text = order.id.to_string();
        let suffix = id_text.rsplit('-').next().unwrap_or("00000000");
        order.tracking_code = Some(format!("SHIP-{}", suffix.to_uppercase()));
        order.sent_at = Some(Utc::now());

        // Log-only courier notification.
        info!(
            reference = %order.reference,
            courier,
            tracking = ?order.tracking_code,
            "Shipment handed to courier"
        );
        Ok(ProcessOutcome::new(order))
    }
}
