use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use turnstile::{EntityId, LifecycleEntity};

/// Workflow states of the station registry.
pub mod states {
    pub const INITIAL: &str = "initial_state";
    pub const ACTIVE: &str = "active";
    pub const RETIRED: &str = "retired";
}

/// A Canadian climate station registered for ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherStation {
    pub id: EntityId,
    pub climate_identifier: String,
    pub station_name: String,
    /// Two-letter province or territory code (e.g. "ON")
    pub province: String,
    pub latitude: f64,
    pub longitude: f64,
    pub first_year: i32,
    pub last_year: i32,
    pub activated_at: Option<DateTime<Utc>>,
}

impl WeatherStation {
    pub fn new(
        climate_identifier: &str,
        station_name: &str,
        province: &str,
        latitude: f64,
        longitude: f64,
        first_year: i32,
        last_year: i32,
    ) -> Self {
        Self {
            id: EntityId::new(),
            climate_identifier: climate_identifier.to_string(),
            station_name: station_name.to_string(),
            province: province.to_string(),
            latitude,
            longitude,
            first_year,
            last_year,
            activated_at: None,
        }
    }
}

impl LifecycleEntity for WeatherStation {
    const KIND: &'static str = "weather_station";

    fn technical_id(&self) -> EntityId {
        self.id
    }
}
