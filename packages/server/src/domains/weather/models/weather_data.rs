use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use turnstile::{EntityId, LifecycleEntity};

/// Workflow states of a daily observation record.
pub mod states {
    pub const INITIAL: &str = "initial_state";
    pub const VALIDATED: &str = "validated";
    pub const ARCHIVED: &str = "archived";
}

/// One day of observations for one station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherData {
    pub id: EntityId,
    pub climate_identifier: String,
    pub observed_on: NaiveDate,

    pub temperature_min: Option<f64>,
    pub temperature_mean: Option<f64>,
    pub temperature_max: Option<f64>,
    pub humidity: Option<f64>,
    pub precipitation_mm: Option<f64>,

    /// Derived on validation: max minus min, when both are present.
    pub temperature_range: Option<f64>,
    pub validated_at: Option<DateTime<Utc>>,
}

impl WeatherData {
    pub fn new(climate_identifier: &str, observed_on: NaiveDate) -> Self {
        Self {
            id: EntityId::new(),
            climate_identifier: climate_identifier.to_string(),
            observed_on,
            temperature_min: None,
            temperature_mean: None,
            temperature_max: None,
            humidity: None,
            precipitation_mm: None,
            temperature_range: None,
            validated_at: None,
        }
    }
}

impl LifecycleEntity for WeatherData {
    const KIND: &'static str = "weather_data";

    fn technical_id(&self) -> EntityId {
        self.id
    }
}
