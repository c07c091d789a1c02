//! Fulfillment processors - transition actions

mod confirm_delivery;
mod dispatch_shipment;
mod picking;

pub use confirm_delivery::ConfirmDeliveryProcessor;
pub use dispatch_shipment::DispatchShipmentProcessor;
pub use picking::{FinishPickingProcessor, StartPickingProcessor};
