use async_trait::async_trait;
use chrono::Utc;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::domains::weather::models::WeatherData;
use crate::kernel::ServerDeps;

/// Plausible Canadian surface temperatures, in Celsius.
const TEMP_RANGE: (f64, f64) = (-60.0, 60.0);

/// Gates observation validation.
pub struct ValidWeatherDataCriterion;

#[async_trait]
impl Criterion<WeatherData, ServerDeps> for ValidWeatherDataCriterion {
    fn name(&self) -> &'static str {
        "ValidWeatherDataCriterion"
    }

    async fn check(
        &self,
        record: &WeatherData,
        _ctx: &CheckContext<'_, ServerDeps>,
    ) -> CheckOutcome {
        // Required fields
        if record.climate_identifier.trim().is_empty() {
            return CheckOutcome::fail("identifier_missing", "climate identifier is required");
        }
        if record.observed_on > Utc::now().date_naive() {
            return CheckOutcome::fail(
                "observation_in_future",
                format!("observation date {} is in the future", record.observed_on),
            );
        }

        // Ranges
        for (label, value) in [
            ("temperature_min", record.temperature_min),
            ("temperature_mean", record.temperature_mean),
            ("temperature_max", record.temperature_max),
        ] {
            if let Some(t) = value {
                if !(TEMP_RANGE.0..=TEMP_RANGE.1).contains(&t) {
                    return CheckOutcome::fail(
                        "temperature_out_of_range",
                        format!("{} {} is outside [{}, {}] C", label, t, TEMP_RANGE.0, TEMP_RANGE.1),
                    );
                }
            }
        }
        if let Some(h) = record.humidity {
            if !(0.0..=100.0).contains(&h) {
                return CheckOutcome::fail(
                    "humidity_out_of_range",
                    format!("humidity {} must be in [0, 100]", h),
                );
            }
        }
        if let Some(p) = record.precipitation_mm {
            if p < 0.0 {
                return CheckOutcome::fail(
                    "precipitation_negative",
                    format!("precipitation {} must be >= 0", p),
                );
            }
        }

        // Cross-field consistency: min <= mean <= max whenever present.
        if let (Some(min), Some(mean)) = (record.temperature_min, record.temperature_mean) {
            if min > mean {
                return CheckOutcome::fail(
                    "temperatures_inconsistent",
                    format!("min {} exceeds mean {}", min, mean),
                );
            }
        }
        if let (Some(mean), Some(max)) = (record.temperature_mean, record.temperature_max) {
            if mean > max {
                return CheckOutcome::fail(
                    "temperatures_inconsistent",
                    format!("mean {} exceeds max {}", mean, max),
                );
            }
        }
        if let (Some(min), Some(max)) = (record.temperature_min, record.temperature_max) {
            if min > max {
                return CheckOutcome::fail(
                    "temperatures_inconsistent",
                    format!("min {} exceeds max {}", min, max),
                );
            }
        }

        let mut warnings = Vec::new();
        if record.temperature_min.is_none()
            && record.temperature_mean.is_none()
            && record.temperature_max.is_none()
        {
            warnings.push("record carries no temperature observations".to_string());
        }
        CheckOutcome::pass_with_warnings(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::mock_deps;
    use chrono::NaiveDate;

    fn record(min: Option<f64>, mean: Option<f64>, max: Option<f64>) -> WeatherData {
        let mut r = WeatherData::new("6105976", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        r.temperature_min = min;
        r.temperature_mean = mean;
        r.temperature_max = max;
        r
    }

    async fn run(record: &WeatherData) -> CheckOutcome {
        let deps = mock_deps();
        let params = serde_json::Value::Null;
        ValidWeatherDataCriterion
            .check(
                record,
                &CheckContext {
                    deps: &deps,
                    params: &params,
                },
            )
            .await
    }

    #[tokio::test]
    async fn ordered_temperatures_pass() {
        let r = record(Some(-12.0), Some(-4.5), Some(1.0));
        assert!(run(&r).await.passed());
    }

    #[tokio::test]
    async fn mean_above_max_is_inconsistent() {
        let r = record(Some(-12.0), Some(3.0), Some(1.0));
        match run(&r).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "temperatures_inconsistent"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn absurd_temperature_is_rejected() {
        let r = record(Some(-75.0), None, None);
        match run(&r).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "temperature_out_of_range"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn humidity_is_bounded() {
        let mut r = record(None, None, None);
        r.humidity = Some(104.0);
        match run(&r).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "humidity_out_of_range"),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
