//! Pet processors - transition actions

mod activate_pet;
mod complete_sale;
mod health;
mod reserve_pet;

pub use activate_pet::ActivatePetProcessor;
pub use complete_sale::CompleteSaleProcessor;
pub use health::{BeginTreatmentProcessor, MarkRecoveringProcessor, ReturnToAvailabilityProcessor};
pub use reserve_pet::{CancelReservationProcessor, HoldForOrderProcessor, ReservePetProcessor};
