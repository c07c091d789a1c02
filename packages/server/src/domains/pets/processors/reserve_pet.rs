//! Reservation processors for the adoption flow and the store-order hold.
//!
//! `ReservePetProcessor` is the adoption entry point: it creates the adoption
//! order itself and then tries, best-effort, to advance that order to
//! `placed`. `HoldForOrderProcessor` is the inverse direction: the order
//! placement processor requests it to take the pet off the market, so it must
//! not create or touch any order.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use turnstile::{
    EntityServiceExt, LifecycleEntity, Mode, ProcessContext, ProcessError, ProcessOutcome,
    Processor,
};

use crate::domains::orders::models::Order;
use crate::domains::pets::models::{AdoptionStatus, Pet};
use crate::kernel::ServerDeps;

pub struct ReservePetProcessor;

#[async_trait]
impl Processor<Pet, ServerDeps> for ReservePetProcessor {
    fn name(&self) -> &'static str {
        "ReservePetProcessor"
    }

    async fn process(
        &self,
        mut pet: Pet,
        ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<Pet>, ProcessError> {
        let buyer_email = ctx
            .params
            .pointer("/order_data/buyer_email")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ProcessError::Precondition("order_data.buyer_email is required".to_string())
            })?
            .to_string();
        let quantity = ctx
            .params
            .pointer("/order_data/quantity")
            .and_then(|v| v.as_u64())
            .unwrap_or(1) as u32;

        pet.adoption_status = AdoptionStatus::Reserved;
        pet.reserved_at = Some(Utc::now());

        // The adoption order is created by this processor; placement failure
        // must not void the reservation itself.
        let mut order = Order::new(&pet, &buyer_email, quantity);
        order.total_amount = Some(order.computed_total());
        let order_meta = ctx.service().save_entity(&order).await?;
        info!(
            pet_id = %pet.id,
            order_id = %order_meta.id,
            buyer = %buyer_email,
            total = order.total_amount,
            "Adoption order created for reserved pet"
        );

        let mut secondary = Vec::new();
        ctx.related(Order::KIND, order.id)
            .transition("confirm", Mode::BestEffort, &mut secondary)
            .await?;

        Ok(ProcessOutcome::with_secondary(pet, secondary))
    }
}

/// Takes the pet off the market on behalf of an order being placed.
pub struct HoldForOrderProcessor;

#[async_trait]
impl Processor<Pet, ServerDeps> for HoldForOrderProcessor {
    fn name(&self) -> &'static str {
        "HoldForOrderProcessor"
    }

    async fn process(
        &self,
        mut pet: Pet,
        _ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<Pet>, ProcessError> {
        pet.adoption_status = AdoptionStatus::Reserved;
        pet.reserved_at = Some(Utc::now());
        info!(pet_id = %pet.id, "Pet held for a placed order");
        Ok(ProcessOutcome::new(pet))
    }
}

/// Releases a held or reserved pet back to the catalog.
pub struct CancelReservationProcessor;

#[async_trait]
impl Processor<Pet, ServerDeps> for CancelReservationProcessor {
    fn name(&self) -> &'static str {
        "CancelReservationProcessor"
    }

    async fn process(
        &self,
        mut pet: Pet,
        _ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<Pet>, ProcessError> {
        pet.adoption_status = AdoptionStatus::Available;
        pet.reserved_at = None;
        info!(pet_id = %pet.id, "Reservation cancelled; pet back in catalog");
        Ok(ProcessOutcome::new(pet))
    }
}
