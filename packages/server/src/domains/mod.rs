// Domains - one module per entity kind, each wiring its own state machine
// from criteria (guards) and processors (actions).

pub mod fulfillment;
pub mod notifications;
pub mod orders;
pub mod pets;
pub mod reports;
pub mod weather;

use std::sync::Arc;

use turnstile::testing::{InMemoryPlatform, PlatformBuilder};
use turnstile::DefinitionError;

use crate::kernel::ServerDeps;

/// Wire every domain's state machine onto one in-memory platform.
pub fn build_platform(
    deps: ServerDeps,
) -> Result<Arc<InMemoryPlatform<ServerDeps>>, DefinitionError> {
    let builder = PlatformBuilder::new(deps)
        .machine(pets::state_machine()?)
        .machine(orders::state_machine()?)
        .machine(fulfillment::state_machine()?)
        .machine(reports::state_machine()?)
        .machine(notifications::state_machine()?)
        .machine(weather::station_state_machine()?)
        .machine(weather::data_state_machine()?);
    Ok(builder.build())
}
