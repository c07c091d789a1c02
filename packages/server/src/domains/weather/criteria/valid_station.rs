use async_trait::async_trait;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::domains::weather::models::WeatherStation;
use crate::kernel::ServerDeps;

/// Canada's bounding box; the registry only ingests Canadian stations.
const CANADA_LAT: (f64, f64) = (41.0, 84.0);
const CANADA_LON: (f64, f64) = (-141.0, -52.0);

/// Observation years accepted by the registry.
const EARLIEST_YEAR: i32 = 1840;
const LATEST_YEAR: i32 = 2025;

/// Gates station activation.
pub struct ValidStationCriterion;

#[async_trait]
impl Criterion<WeatherStation, ServerDeps> for ValidStationCriterion {
    fn name(&self) -> &'static str {
        "ValidStationCriterion"
    }

    async fn check(
        &self,
        station: &WeatherStation,
        _ctx: &CheckContext<'_, ServerDeps>,
    ) -> CheckOutcome {
        // Required fields
        if station.climate_identifier.trim().is_empty() {
            return CheckOutcome::fail("identifier_missing", "climate identifier is required");
        }
        if station.station_name.trim().is_empty() {
            return CheckOutcome::fail("name_missing", "station name is required");
        }

        // Global coordinate ranges
        if !(-90.0..=90.0).contains(&station.latitude) {
            return CheckOutcome::fail(
                "latitude_out_of_range",
                format!("latitude {} must be in [-90, 90]", station.latitude),
            );
        }
        if !(-180.0..=180.0).contains(&station.longitude) {
            return CheckOutcome::fail(
                "longitude_out_of_range",
                format!("longitude {} must be in [-180, 180]", station.longitude),
            );
        }

        // Registry-specific geography
        if !(CANADA_LAT.0..=CANADA_LAT.1).contains(&station.latitude)
            || !(CANADA_LON.0..=CANADA_LON.1).contains(&station.longitude)
        {
            return CheckOutcome::fail(
                "outside_canada",
                format!(
                    "({}, {}) is outside the Canadian bounding box",
                    station.latitude, station.longitude
                ),
            );
        }

        // Observation years
        if station.first_year > station.last_year {
            return CheckOutcome::fail(
                "years_inverted",
                format!(
                    "first_year {} is after last_year {}",
                    station.first_year, station.last_year
                ),
            );
        }
        if station.first_year < EARLIEST_YEAR || station.last_year > LATEST_YEAR {
            return CheckOutcome::fail(
                "years_out_of_range",
                format!(
                    "observation years must fall within [{}, {}]",
                    EARLIEST_YEAR, LATEST_YEAR
                ),
            );
        }

        let mut warnings = Vec::new();
        if station.last_year < 2000 {
            warnings.push(format!(
                "station has not reported since {}",
                station.last_year
            ));
        }
        CheckOutcome::pass_with_warnings(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::mock_deps;

    fn station(latitude: f64, longitude: f64, first_year: i32, last_year: i32) -> WeatherStation {
        WeatherStation::new(
            "6105976",
            "OTTAWA CDA",
            "ON",
            latitude,
            longitude,
            first_year,
            last_year,
        )
    }

    async fn run(station: &WeatherStation) -> CheckOutcome {
        let deps = mock_deps();
        let params = serde_json::Value::Null;
        ValidStationCriterion
            .check(
                station,
                &CheckContext {
                    deps: &deps,
                    params: &params,
                },
            )
            .await
    }

    #[tokio::test]
    async fn ottawa_station_with_sane_years_passes() {
        let s = station(45.0, -75.0, 1990, 2024);
        assert!(run(&s).await.passed());
    }

    #[tokio::test]
    async fn station_outside_canada_is_rejected() {
        let s = station(35.0, -75.0, 1990, 2024);
        match run(&s).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "outside_canada"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn impossible_latitude_is_rejected_before_geography() {
        let s = station(95.0, -75.0, 1990, 2024);
        match run(&s).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "latitude_out_of_range"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn inverted_years_are_rejected() {
        let s = station(45.0, -75.0, 2024, 1990);
        match run(&s).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "years_inverted"),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
