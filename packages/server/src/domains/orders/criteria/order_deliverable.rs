use async_trait::async_trait;
use chrono::{Duration, Utc};
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::domains::orders::models::Order;
use crate::kernel::ServerDeps;

/// Gates delivery completion: the order must have been paid and shipped.
pub struct OrderDeliverableCriterion;

#[async_trait]
impl Criterion<Order, ServerDeps> for OrderDeliverableCriterion {
    fn name(&self) -> &'static str {
        "OrderDeliverableCriterion"
    }

    async fn check(&self, order: &Order, _ctx: &CheckContext<'_, ServerDeps>) -> CheckOutcome {
        if order.payment_transaction_id.is_none() {
            return CheckOutcome::fail(
                "payment_missing",
                "order has no authorized payment transaction",
            );
        }
        if order.tracking_number.is_none() {
            return CheckOutcome::fail("tracking_missing", "order has no tracking number");
        }

        // Advisory only: stale orders still deliver, but someone should look.
        let mut warnings = Vec::new();
        if let Some(placed_at) = order.placed_at {
            if Utc::now() - placed_at > Duration::days(30) {
                warnings.push(format!("order was placed {} and is over 30 days old", placed_at));
            }
        }
        CheckOutcome::pass_with_warnings(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::pets::models::Pet;
    use crate::kernel::test_dependencies::mock_deps;

    async fn run(order: &Order) -> CheckOutcome {
        let deps = mock_deps();
        let params = serde_json::Value::Null;
        OrderDeliverableCriterion
            .check(
                order,
                &CheckContext {
                    deps: &deps,
                    params: &params,
                },
            )
            .await
    }

    #[tokio::test]
    async fn unpaid_order_is_not_deliverable() {
        let pet = Pet::new("Biscuit", "dog", 120.0);
        let order = Order::new(&pet, "buyer@example.org", 1);
        match run(&order).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "payment_missing"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn paid_and_tracked_order_is_deliverable() {
        let pet = Pet::new("Biscuit", "dog", 120.0);
        let mut order = Order::new(&pet, "buyer@example.org", 1);
        order.payment_transaction_id = Some("txn-1".to_string());
        order.tracking_number = Some("TRK-ABCD".to_string());
        assert!(run(&order).await.passed());
    }
}
