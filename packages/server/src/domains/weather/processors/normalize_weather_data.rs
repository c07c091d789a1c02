//! Observation validation - derive fields and stamp the record.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use turnstile::{ProcessContext, ProcessError, ProcessOutcome, Processor};

use crate::domains::weather::models::WeatherData;
use crate::kernel::ServerDeps;

pub struct NormalizeWeatherDataProcessor;

#[async_trait]
impl Processor<WeatherData, ServerDeps> for NormalizeWeatherDataProcessor {
    fn name(&self) -> &'static str {
        "NormalizeWeatherDataProcessor"
    }

    async fn process(
        &self,
        mut record: WeatherData,
        _ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<WeatherData>, ProcessError> {
        if let (Some(min), Some(max)) = (record.temperature_min, record.temperature_max) {
            record.temperature_range = Some(max - min);
        }
        record.validated_at = Some(Utc::now());
        debug!(
            station = %record.climate_identifier,
            date = %record.observed_on,
            range = ?record.temperature_range,
            "Observation validated"
        );
        Ok(ProcessOutcome::new(record))
    }
}
