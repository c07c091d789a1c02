//! Pet domain: catalog lifecycle plus the parallel adoption and health flows.
//!
//! ```text
//! initial_state --activate--> available --reserve/hold_for_order--> pending
//!     pending --complete_sale--> sold
//!     pending --cancel_reservation--> available
//!     available --begin_treatment--> under_treatment --mark_recovering-->
//!     recovering --return_to_availability--> available
//! ```

pub mod criteria;
pub mod models;
pub mod processors;

use turnstile::{DefinitionError, LifecycleEntity, StateMachine, Transition};

use crate::kernel::ServerDeps;
use criteria::{PetAvailableCriterion, PetHealthyCriterion, ValidPetCriterion};
use models::{states, Pet};
use processors::{
    ActivatePetProcessor, BeginTreatmentProcessor, CancelReservationProcessor,
    CompleteSaleProcessor, HoldForOrderProcessor, MarkRecoveringProcessor, ReservePetProcessor,
    ReturnToAvailabilityProcessor,
};

pub fn state_machine() -> Result<StateMachine<Pet, ServerDeps>, DefinitionError> {
    StateMachine::builder()
        .states(&[
            states::INITIAL,
            states::AVAILABLE,
            states::PENDING,
            states::SOLD,
            states::UNDER_TREATMENT,
            states::RECOVERING,
        ])
        .initial(states::INITIAL)
        .transition(
            Transition::new("activate", states::AVAILABLE)
                .from(&[states::INITIAL])
                .criterion(ValidPetCriterion)
                .processor(ActivatePetProcessor),
        )
        .transition(
            Transition::new("reserve", states::PENDING)
                .from(&[states::AVAILABLE])
                .criterion(PetAvailableCriterion)
                .processor(ReservePetProcessor),
        )
        .transition(
            Transition::new("hold_for_order", states::PENDING)
                .from(&[states::AVAILABLE])
                .criterion(PetAvailableCriterion)
                .processor(HoldForOrderProcessor),
        )
        .transition(
            Transition::new("cancel_reservation", states::AVAILABLE)
                .from(&[states::PENDING])
                .processor(CancelReservationProcessor),
        )
        .transition(
            Transition::new("complete_sale", states::SOLD)
                .from(&[states::PENDING])
                .processor(CompleteSaleProcessor),
        )
        .transition(
            Transition::new("begin_treatment", states::UNDER_TREATMENT)
                .from(&[states::AVAILABLE])
                .processor(BeginTreatmentProcessor),
        )
        .transition(
            Transition::new("mark_recovering", states::RECOVERING)
                .from(&[states::UNDER_TREATMENT])
                .processor(MarkRecoveringProcessor),
        )
        .transition(
            Transition::new("return_to_availability", states::AVAILABLE)
                .from(&[states::RECOVERING])
                .criterion(PetHealthyCriterion)
                .processor(ReturnToAvailabilityProcessor),
        )
        .build(Pet::KIND)
}
