// Seed a demo catalog and drive one order from placement to delivery.

use anyhow::{Context, Result};
use orchestrator_core::domains;
use orchestrator_core::domains::orders::models::Order;
use orchestrator_core::domains::pets::models::Pet;
use orchestrator_core::kernel::ServerDeps;
use orchestrator_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use turnstile::{EntityServiceExt, LifecycleEntity};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,orchestrator_core=debug,turnstile=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Seeding demo catalog");

    let config = Config::from_env().context("Failed to load configuration")?;
    let deps = ServerDeps::from_config(&config);
    let platform = domains::build_platform(deps).context("Failed to wire state machines")?;
    let service = platform.service();

    // Catalog
    let mut first_pet: Option<Pet> = None;
    for (name, species, price) in [
        ("Biscuit", "dog", 180.0),
        ("Clementine", "cat", 120.0),
        ("Pickle", "parrot", 260.0),
    ] {
        let pet = Pet::new(name, species, price);
        let meta = service
            .save_entity(&pet)
            .await
            .context("Failed to save pet")?;
        service
            .transition(Pet::KIND, meta.id, "activate")
            .await
            .context("Failed to activate pet")?;
        tracing::info!(%meta.id, name, "Pet activated");
        first_pet.get_or_insert(pet);
    }

    // One order, placed through delivery
    let pet = first_pet.expect("catalog seeded above");
    let order = Order::new(&pet, "demo.buyer@example.org", 1);
    service
        .save_entity(&order)
        .await
        .context("Failed to save order")?;

    for transition in ["place", "approve", "begin_processing", "complete_delivery"] {
        let receipt = service
            .transition(Order::KIND, order.id, transition)
            .await
            .with_context(|| format!("Transition '{}' failed", transition))?;
        tracing::info!(
            order_id = %order.id,
            transition,
            state = %receipt.meta.state,
            secondary = receipt.secondary.len(),
            "Order transition committed"
        );
    }

    let records = platform.audit_trail();
    tracing::info!(
        transitions = records.len(),
        committed = records.iter().filter(|r| r.committed()).count(),
        "Seed run complete"
    );
    Ok(())
}
