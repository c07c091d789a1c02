//! Station activation - registers the station and ingests recent daily data.
//!
//! Ingestion is best-effort twice over: an unreachable GeoMet falls back to a
//! mock sample, and each created record's `validate` transition failure is
//! recorded without voiding the activation.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::{info, warn};
use turnstile::{
    EntityServiceExt, LifecycleEntity, Mode, ProcessContext, ProcessError, ProcessOutcome,
    Processor,
};

use crate::domains::weather::models::{WeatherData, WeatherStation};
use crate::kernel::{ClimateDaily, ServerDeps};

/// How many recent days to pull on activation.
const INGEST_DAYS: usize = 7;

pub struct ActivateStationProcessor;

#[async_trait]
impl Processor<WeatherStation, ServerDeps> for ActivateStationProcessor {
    fn name(&self) -> &'static str {
        "ActivateStationProcessor"
    }

    async fn process(
        &self,
        mut station: WeatherStation,
        ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<WeatherStation>, ProcessError> {
        station.activated_at = Some(Utc::now());

        let daily = match ctx
            .deps
            .weather
            .climate_daily(&station.climate_identifier, INGEST_DAYS)
            .await
        {
            Ok(daily) if !daily.is_empty() => daily,
            Ok(_) => {
                warn!(
                    station = %station.climate_identifier,
                    "GeoMet returned no recent records; seeding a mock sample"
                );
                fallback_sample(&station.climate_identifier)
            }
            Err(e) => {
                warn!(
                    station = %station.climate_identifier,
                    error = %e,
                    "GeoMet unavailable; seeding a mock sample"
                );
                fallback_sample(&station.climate_identifier)
            }
        };

        let mut secondary = Vec::new();
        let mut ingested = 0usize;
        for observation in &daily {
            let mut record =
                WeatherData::new(&observation.climate_identifier, observation.date);
            record.temperature_min = observation.temperature_min;
            record.temperature_mean = observation.temperature_mean;
            record.temperature_max = observation.temperature_max;
            record.precipitation_mm = observation.total_precipitation;

            if let Err(e) = ctx.service().save_entity(&record).await {
                warn!(
                    station = %station.climate_identifier,
                    date = %observation.date,
                    error = %e,
                    "Skipping observation that failed to save"
                );
                continue;
            }
            ingested += 1;

            ctx.related(WeatherData::KIND, record.id)
                .transition("validate", Mode::BestEffort, &mut secondary)
                .await?;
        }

        info!(
            station = %station.climate_identifier,
            name = %station.station_name,
            ingested,
            "Station activated"
        );
        Ok(ProcessOutcome::with_secondary(station, secondary))
    }
}

/// Mild one-day sample used when the upstream cannot be read.
fn fallback_sample(climate_identifier: &str) -> Vec<ClimateDaily> {
    vec![ClimateDaily {
        climate_identifier: climate_identifier.to_string(),
        date: (Utc::now() - Duration::days(1)).date_naive(),
        temperature_min: Some(4.0),
        temperature_mean: Some(9.5),
        temperature_max: Some(15.0),
        total_precipitation: Some(0.0),
    }]
}
