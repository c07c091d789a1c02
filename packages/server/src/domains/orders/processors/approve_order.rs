//! Order approval - payment authorization and tracking assignment.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use turnstile::{ProcessContext, ProcessError, ProcessOutcome, Processor};

use crate::domains::orders::models::{Order, OrderStatus};
use crate::kernel::ServerDeps;

pub struct ApproveOrderProcessor;

#[async_trait]
impl Processor<Order, ServerDeps> for ApproveOrderProcessor {
    fn name(&self) -> &'static str {
        "ApproveOrderProcessor"
    }

    async fn process(
        &self,
        mut order: Order,
        ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<Order>, ProcessError> {
        let amount = order
            .total_amount
            .ok_or_else(|| ProcessError::Precondition("order has no total amount".to_string()))?;

        // Payment sits on the critical path: a transport failure or a decline
        // both abort approval.
        let reference = order.id.to_string();
        let decision = ctx.deps.payment.authorize(&reference, amount).await?;
        if !decision.approved {
            return Err(ProcessError::PaymentDeclined(
                decision
                    .reason
                    .unwrap_or_else(|| "no reason given".to_string()),
            ));
        }
        order.payment_transaction_id = decision.transaction_id;

        // Tracking number derives from the order id's last UUID segment.
        let id_text = order.id.to_string();
        let suffix = id_text.rsplit('-').next().unwrap_or("00000000");
        order.tracking_number = Some(format!("TRK-{}", suffix.to_uppercase()));

        order.status = OrderStatus::Approved;
        order.approved_at = Some(Utc::now());

        info!(
            order_id = %order.id,
            amount,
            tracking = ?order.tracking_number,
            "Order approved and payment captured"
        );
        Ok(ProcessOutcome::new(order))
    }
}
