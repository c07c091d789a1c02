//! Weather domain: station registry and daily observation validation.
//!
//! ```text
//! station: initial_state --activate--> active --retire--> retired
//! data:    initial_state --validate--> validated --archive--> archived
//! ```
//!
//! Activation ingests recent GeoMet daily records and requests `validate` on
//! each created observation, best-effort.

pub mod criteria;
pub mod models;
pub mod processors;

use turnstile::{DefinitionError, LifecycleEntity, StateMachine, Transition};

use crate::kernel::ServerDeps;
use criteria::{ValidStationCriterion, ValidWeatherDataCriterion};
use models::{data_states, station_states, WeatherData, WeatherStation};
use processors::{ActivateStationProcessor, NormalizeWeatherDataProcessor};

pub fn station_state_machine() -> Result<StateMachine<WeatherStation, ServerDeps>, DefinitionError>
{
    StateMachine::builder()
        .states(&[
            station_states::INITIAL,
            station_states::ACTIVE,
            station_states::RETIRED,
        ])
        .initial(station_states::INITIAL)
        .transition(
            Transition::new("activate", station_states::ACTIVE)
                .from(&[station_states::INITIAL])
                .criterion(ValidStationCriterion)
                .processor(ActivateStationProcessor),
        )
        .transition(
            Transition::new("retire", station_states::RETIRED)
                .from(&[station_states::ACTIVE]),
        )
        .build(WeatherStation::KIND)
}

pub fn data_state_machine() -> Result<StateMachine<WeatherData, ServerDeps>, DefinitionError> {
    StateMachine::builder()
        .states(&[
            data_states::INITIAL,
            data_states::VALIDATED,
            data_states::ARCHIVED,
        ])
        .initial(data_states::INITIAL)
        .transition(
            Transition::new("validate", data_states::VALIDATED)
                .from(&[data_states::INITIAL])
                .criterion(ValidWeatherDataCriterion)
                .processor(NormalizeWeatherDataProcessor),
        )
        .transition(
            Transition::new("archive", data_states::ARCHIVED)
                .from(&[data_states::VALIDATED]),
        )
        .build(WeatherData::KIND)
}
