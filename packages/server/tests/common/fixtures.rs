//! Shared wiring for flow tests: a platform over mock services, plus a few
//! seeded-entity helpers.

use std::sync::Arc;

use orchestrator_core::domains::build_platform;
use orchestrator_core::domains::pets::models::Pet;
use orchestrator_core::kernel::test_dependencies::{
    MockEmailService, MockPaymentGateway, MockPetstoreApi, MockWeatherApi,
};
use orchestrator_core::kernel::ServerDeps;
use turnstile::testing::InMemoryPlatform;
use turnstile::{EntityId, EntityServiceExt, LifecycleEntity};

pub const OPS_MAILBOX: &str = "ops@harborlane.dev";

/// Every mock handed to a platform, kept around for assertions.
pub struct TestHarness {
    pub platform: Arc<InMemoryPlatform<ServerDeps>>,
    pub email: Arc<MockEmailService>,
    pub payment: Arc<MockPaymentGateway>,
    pub petstore: Arc<MockPetstoreApi>,
    pub weather: Arc<MockWeatherApi>,
}

impl TestHarness {
    pub fn service(&self) -> Arc<dyn turnstile::EntityService> {
        self.platform.service()
    }
}

pub fn harness() -> TestHarness {
    harness_with(
        MockEmailService::new(),
        MockPaymentGateway::new(),
        MockPetstoreApi::new(),
        MockWeatherApi::new(),
    )
}

pub fn harness_with(
    email: MockEmailService,
    payment: MockPaymentGateway,
    petstore: MockPetstoreApi,
    weather: MockWeatherApi,
) -> TestHarness {
    let email = Arc::new(email);
    let payment = Arc::new(payment);
    let petstore = Arc::new(petstore);
    let weather = Arc::new(weather);

    let deps = ServerDeps::new(
        email.clone(),
        payment.clone(),
        petstore.clone(),
        weather.clone(),
        OPS_MAILBOX.to_string(),
        None,
    );
    let platform = build_platform(deps).expect("state machines wire cleanly");
    TestHarness {
        platform,
        email,
        payment,
        petstore,
        weather,
    }
}

/// Save and activate a pet, returning its id.
pub async fn seeded_pet(
    service: &Arc<dyn turnstile::EntityService>,
    name: &str,
    species: &str,
    price: f64,
) -> (EntityId, Pet) {
    let pet = Pet::new(name, species, price);
    let meta = service.save_entity(&pet).await.expect("pet saves");
    service
        .transition(Pet::KIND, meta.id, "activate")
        .await
        .expect("pet activates");
    (meta.id, pet)
}
