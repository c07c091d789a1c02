//! Warehouse fulfillment domain - the second, independent order schema.
//!
//! ```text
//! WAITING_TO_FULFILL --start_picking--> PICKING --finish_picking-->
//! WAITING_TO_SEND --dispatch--> SENT --confirm_delivery--> DELIVERED
//! ```

pub mod criteria;
pub mod models;
pub mod processors;

use turnstile::{DefinitionError, LifecycleEntity, StateMachine, Transition};

use crate::kernel::ServerDeps;
use criteria::{FulfillmentLinesCriterion, ShipmentConsistencyCriterion};
use models::{states, FulfillmentOrder};
use processors::{
    ConfirmDeliveryProcessor, DispatchShipmentProcessor, FinishPickingProcessor,
    StartPickingProcessor,
};

pub fn state_machine() -> Result<StateMachine<FulfillmentOrder, ServerDeps>, DefinitionError> {
    StateMachine::builder()
        .states(&[
            states::WAITING_TO_FULFILL,
            states::PICKING,
            states::WAITING_TO_SEND,
            states::SENT,
            states::DELIVERED,
        ])
        .initial(states::WAITING_TO_FULFILL)
        .transition(
            Transition::new("start_picking", states::PICKING)
                .from(&[states::WAITING_TO_FULFILL])
                .criterion(FulfillmentLinesCriterion)
                .processor(StartPickingProcessor),
        )
        .transition(
            Transition::new("finish_picking", states::WAITING_TO_SEND)
                .from(&[states::PICKING])
                .processor(FinishPickingProcessor),
        )
        .transition(
            Transition::new("dispatch", states::SENT)
                .from(&[states::WAITING_TO_SEND])
                .processor(DispatchShipmentProcessor),
        )
        .transition(
            Transition::new("confirm_delivery", states::DELIVERED)
                .from(&[states::SENT])
                .criterion(ShipmentConsistencyCriterion)
                .processor(ConfirmDeliveryProcessor),
        )
        .build(FulfillmentOrder::KIND)
}
