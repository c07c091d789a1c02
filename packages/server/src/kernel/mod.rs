// Kernel - infrastructure services and dependency injection
//
// Domain code never constructs a concrete client; it receives ServerDeps and
// talks to Base* traits.

pub mod deps;
pub mod email;
pub mod geomet_client;
pub mod payment;
pub mod petstore_client;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use email::SimulatedEmailService;
pub use geomet_client::GeoMetClient;
pub use payment::SimulatedPaymentGateway;
pub use petstore_client::PetstoreClient;
pub use traits::{
    BaseEmailService, BasePaymentGateway, BasePetstoreApi, BaseWeatherApi, CatalogPet,
    ClimateDaily, ClimateStation, EmailMessage, PaymentDecision,
};
