//! Order placement - the critical-path end of the pet/order coupling.
//!
//! The referenced pet must exist and be adoptable; any failure here
//! propagates and the order never leaves its initial state.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use turnstile::{
    LifecycleEntity, Mode, ProcessContext, ProcessError, ProcessOutcome, Processor,
};

use crate::domains::orders::models::{Order, OrderStatus};
use crate::domains::pets::models::{states as pet_states, Pet};
use crate::kernel::ServerDeps;

pub struct CreateOrderProcessor;

#[async_trait]
impl Processor<Order, ServerDeps> for CreateOrderProcessor {
    fn name(&self) -> &'static str {
        "CreateOrderProcessor"
    }

    async fn process(
        &self,
        mut order: Order,
        ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<Order>, ProcessError> {
        // Primary dependency: pet lookup and availability. Propagates.
        let related_pet = ctx.related(Pet::KIND, order.pet_id);
        let pet_doc = related_pet.expect_state(&[pet_states::AVAILABLE]).await?;
        let pet: Pet = pet_doc.decode()?;
        if !pet.is_adoptable() {
            return Err(ProcessError::Precondition(format!(
                "pet {} is not adoptable (adoption {:?}, health {:?})",
                pet.id, pet.adoption_status, pet.health_status
            )));
        }

        order.unit_price = pet.unit_price;
        order.total_amount = Some(order.computed_total());
        order.status = OrderStatus::Placed;
        order.placed_at = Some(Utc::now());

        // The hold is part of placement: if the pet cannot be held, the
        // order must not be placed.
        let mut secondary = Vec::new();
        related_pet
            .transition("hold_for_order", Mode::Primary, &mut secondary)
            .await?;

        info!(
            order_id = %order.id,
            pet_id = %order.pet_id,
            quantity = order.quantity,
            total = order.total_amount,
            "Order placed"
        );
        Ok(ProcessOutcome::with_secondary(order, secondary))
    }
}

/// Finishes an adoption order created by the pet-side reservation processor.
/// Deliberately does not touch the pet: the pet is already mid-reservation.
pub struct ConfirmAdoptionOrderProcessor;

#[async_trait]
impl Processor<Order, ServerDeps> for ConfirmAdoptionOrderProcessor {
    fn name(&self) -> &'static str {
        "ConfirmAdoptionOrderProcessor"
    }

    async fn process(
        &self,
        mut order: Order,
        _ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<Order>, ProcessError> {
        order.status = OrderStatus::Placed;
        order.placed_at = Some(Utc::now());
        if order.total_amount.is_none() {
            order.total_amount = Some(order.computed_total());
        }
        info!(order_id = %order.id, pet_id = %order.pet_id, "Adoption order confirmed");
        Ok(ProcessOutcome::new(order))
    }
}
