//! Store order domain: placement, payment approval, processing, delivery.
//!
//! ```text
//! initial_state --place/confirm--> placed --approve--> approved
//!     approved --begin_processing--> processing --complete_delivery--> delivered
//! ```
//!
//! `place` is the store entry (validates the pet, holds it); `confirm` is the
//! adoption entry (the pet-side reservation processor already owns the pet).

pub mod criteria;
pub mod models;
pub mod processors;

use turnstile::{DefinitionError, LifecycleEntity, StateMachine, Transition};

use crate::kernel::ServerDeps;
use criteria::{OrderDeliverableCriterion, ValidOrderCriterion};
use models::{states, Order};
use processors::{
    ApproveOrderProcessor, CompleteDeliveryProcessor, ConfirmAdoptionOrderProcessor,
    CreateOrderProcessor, PrepareShipmentProcessor,
};

pub fn state_machine() -> Result<StateMachine<Order, ServerDeps>, DefinitionError> {
    StateMachine::builder()
        .states(&[
            states::INITIAL,
            states::PLACED,
            states::APPROVED,
            states::PROCESSING,
            states::DELIVERED,
        ])
        .initial(states::INITIAL)
        .transition(
            Transition::new("place", states::PLACED)
                .from(&[states::INITIAL])
                .criterion(ValidOrderCriterion)
                .processor(CreateOrderProcessor),
        )
        .transition(
            Transition::new("confirm", states::PLACED)
                .from(&[states::INITIAL])
                .criterion(ValidOrderCriterion)
                .processor(ConfirmAdoptionOrderProcessor),
        )
        .transition(
            Transition::new("approve", states::APPROVED)
                .from(&[states::PLACED])
                .criterion(ValidOrderCriterion)
                .processor(ApproveOrderProcessor),
        )
        .transition(
            Transition::new("begin_processing", states::PROCESSING)
                .from(&[states::APPROVED])
                .processor(PrepareShipmentProcessor),
        )
        .transition(
            Transition::new("complete_delivery", states::DELIVERED)
                .from(&[states::PROCESSING])
                .criterion(OrderDeliverableCriterion)
                .processor(CompleteDeliveryProcessor),
        )
        .build(Order::KIND)
}
