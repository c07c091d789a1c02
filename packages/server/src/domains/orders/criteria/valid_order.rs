use async_trait::async_trait;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::common::validate::is_valid_email;
use crate::domains::orders::models::{Order, OrderStatus};
use crate::kernel::ServerDeps;

/// Business rule: at most this many animals per order.
const MAX_QUANTITY_PER_ORDER: u32 = 10;

/// Tolerance when comparing a stored total against unit price x quantity.
const TOTAL_EPSILON: f64 = 0.005;

/// Gates order placement and approval.
pub struct ValidOrderCriterion;

#[async_trait]
impl Criterion<Order, ServerDeps> for ValidOrderCriterion {
    fn name(&self) -> &'static str {
        "ValidOrderCriterion"
    }

    async fn check(&self, order: &Order, _ctx: &CheckContext<'_, ServerDeps>) -> CheckOutcome {
        // Required fields
        if order.buyer_email.trim().is_empty() {
            return CheckOutcome::fail("buyer_email_missing", "buyer email is required");
        }

        // Formats and ranges
        if !is_valid_email(&order.buyer_email) {
            return CheckOutcome::fail(
                "buyer_email_invalid",
                format!("'{}' is not a valid email address", order.buyer_email),
            );
        }
        if order.quantity == 0 {
            return CheckOutcome::fail("quantity_out_of_range", "quantity must be > 0");
        }
        if order.quantity > MAX_QUANTITY_PER_ORDER {
            return CheckOutcome::fail(
                "quantity_out_of_range",
                format!(
                    "quantity {} exceeds the maximum of {} per order",
                    order.quantity, MAX_QUANTITY_PER_ORDER
                ),
            );
        }
        if order.unit_price <= 0.0 {
            return CheckOutcome::fail("price_out_of_range", "unit price must be positive");
        }

        // Cross-field consistency
        if let Some(total) = order.total_amount {
            if (total - order.computed_total()).abs() > TOTAL_EPSILON {
                return CheckOutcome::fail(
                    "total_mismatch",
                    format!(
                        "total {} does not equal unit price x quantity = {}",
                        total,
                        order.computed_total()
                    ),
                );
            }
        }

        // State-correlated business rule: a delivered order must carry its
        // delivery timestamp. Hard failure in this schema.
        if order.status == OrderStatus::Delivered && order.delivered_at.is_none() {
            return CheckOutcome::fail(
                "delivered_without_timestamp",
                "order is delivered but has no delivered_at",
            );
        }

        let mut warnings = Vec::new();
        if order.quantity > 5 {
            warnings.push(format!(
                "large order ({} animals); staff review recommended",
                order.quantity
            ));
        }
        CheckOutcome::pass_with_warnings(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::pets::models::Pet;
    use crate::kernel::test_dependencies::mock_deps;
    use chrono::Utc;

    fn order(quantity: u32) -> Order {
        let pet = Pet::new("Biscuit", "dog", 120.0);
        Order::new(&pet, "buyer@example.org", quantity)
    }

    async fn run(order: &Order) -> CheckOutcome {
        let deps = mock_deps();
        let params = serde_json::Value::Null;
        ValidOrderCriterion
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
    async fn zero_quantity_is_rejected() {
        match run(&order(0)).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "quantity_out_of_range"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn eleven_animals_exceed_the_business_limit() {
        match run(&order(11)).await {
            CheckOutcome::Fail { code, detail } => {
                assert_eq!(code, "quantity_out_of_range");
                assert!(detail.contains("maximum of 10"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let mut o = order(1);
        o.buyer_email = "not-an-email".to_string();
        match run(&o).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "buyer_email_invalid"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn inconsistent_total_is_rejected() {
        let mut o = order(2);
        o.total_amount = Some(999.0);
        match run(&o).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "total_mismatch"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delivered_order_requires_timestamp() {
        let mut o = order(1);
        o.status = OrderStatus::Delivered;
        o.delivered_at = None;
        match run(&o).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "delivered_without_timestamp"),
            other => panic!("expected failure, got {other:?}"),
        }

        o.delivered_at = Some(Utc::now());
        assert!(run(&o).await.passed());
    }

    #[tokio::test]
    async fn large_but_legal_order_warns_only() {
        match run(&order(7)).await {
            CheckOutcome::Pass { warnings } => assert_eq!(warnings.len(), 1),
            other => panic!("expected pass, got {other:?}"),
        }
    }
}
