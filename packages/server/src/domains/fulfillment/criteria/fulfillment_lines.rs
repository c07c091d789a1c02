use async_trait::async_trait;
use std::collections::HashSet;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::domains::fulfillment::models::FulfillmentOrder;
use crate::kernel::ServerDeps;

/// Warehouse picking cap per line.
const MAX_LINE_QUANTITY: u32 = 100;

/// Gates the start of picking: there must be something pickable.
pub struct FulfillmentLinesCriterion;

#[async_trait]
impl Criterion<FulfillmentOrder, ServerDeps> for FulfillmentLinesCriterion {
    fn name(&self) -> &'static str {
        "FulfillmentLinesCriterion"
    }

    async fn check(
        &self,
        order: &FulfillmentOrder,
        _ctx: &CheckContext<'_, ServerDeps>,
    ) -> CheckOutcome {
        if order.reference.trim().is_empty() {
            return CheckOutcome::fail("reference_missing", "fulfillment reference is required");
        }
        if order.lines.is_empty() {
            return CheckOutcome::fail("no_lines", "fulfillment order has no lines");
        }
        for line in &order.lines {
            if line.sku.trim().is_empty() {
                return CheckOutcome::fail("line_sku_missing", "every line needs a sku");
            }
            if line.quantity == 0 || line.quantity > MAX_LINE_QUANTITY {
                return CheckOutcome::fail(
                    "line_quantity_invalid",
                    format!(
                        "line {} quantity {} must be in [1, {}]",
                        line.sku, line.quantity, MAX_LINE_QUANTITY
                    ),
                );
            }
        }

        // Duplicate skus are legal (split lines) but worth a flag.
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();
        for line in &order.lines {
            if !seen.insert(line.sku.as_str()) {
                warnings.push(format!("sku {} appears on more than one line", line.sku));
            }
        }
        CheckOutcome::pass_with_warnings(warnings)
    }
}
