use async_trait::async_trait;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::domains::fulfillment::models::FulfillmentOrder;
use crate::kernel::ServerDeps;

/// Gates delivery confirmation in the warehouse schema. Unlike the store
/// order criterion, a missing delivery timestamp here is advisory only; the
/// confirmation processor is the one that records it.
pub struct ShipmentConsistencyCriterion;

#[async_trait]
impl Criterion<FulfillmentOrder, ServerDeps> for ShipmentConsistencyCriterion {
    fn name(&self) -> &'static str {
        "ShipmentConsistencyCriterion"
    }

    async fn check(
        &self,
        order: &FulfillmentOrder,
        _ctx: &CheckContext<'_, ServerDeps>,
    ) -> CheckOutcome {
        let Some(sent_at) = order.sent_at else {
            return CheckOutcome::fail("not_sent", "shipment has no sent_at timestamp");
        };
        if order.tracking_code.is_none() {
            return CheckOutcome::fail("tracking_missing", "shipment has no tracking code");
        }

        // Cross-field ordering is hard; absence is only advisory here.
        let mut warnings = Vec::new();
        match order.delivered_at {
            Some(delivered_at) if delivered_at < sent_at => {
                return CheckOutcome::fail(
                    "timestamps_out_of_order",
                    format!("delivered_at {} precedes sent_at {}", delivered_at, sent_at),
                );
            }
            Some(_) => {}
            None => warnings.push("delivery timestamp not yet recorded".to_string()),
        }
        CheckOutcome::pass_with_warnings(warnings)
    }
}
