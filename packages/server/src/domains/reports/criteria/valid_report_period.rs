use async_trait::async_trait;
use chrono::Utc;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::domains::reports::models::PerformanceReport;
use crate::kernel::ServerDeps;

const MAX_PERIOD_DAYS: i64 = 365;
const SHORT_PERIOD_DAYS: i64 = 7;

/// Gates aggregation: the reporting window has to make sense before any data
/// is scanned.
pub struct ValidReportPeriodCriterion;

#[async_trait]
impl Criterion<PerformanceReport, ServerDeps> for ValidReportPeriodCriterion {
    fn name(&self) -> &'static str {
        "ValidReportPeriodCriterion"
    }

    async fn check(
        &self,
        report: &PerformanceReport,
        _ctx: &CheckContext<'_, ServerDeps>,
    ) -> CheckOutcome {
        if report.title.trim().is_empty() {
            return CheckOutcome::fail("title_missing", "report title is required");
        }

        let days = report.period_days();
        if days <= 0 {
            return CheckOutcome::fail(
                "period_invalid",
                format!(
                    "period end {} must be after start {}",
                    report.report_period_end, report.report_period_start
                ),
            );
        }
        if days > MAX_PERIOD_DAYS {
            return CheckOutcome::fail(
                "period_out_of_range",
                format!("period of {} days exceeds the {}-day maximum", days, MAX_PERIOD_DAYS),
            );
        }
        if report.report_period_end > Utc::now().date_naive() {
            return CheckOutcome::fail(
                "period_in_future",
                format!("period end {} is in the future", report.report_period_end),
            );
        }

        let mut warnings = Vec::new();
        if days < SHORT_PERIOD_DAYS {
            warnings.push(format!("short reporting period of {} days", days));
        }
        CheckOutcome::pass_with_warnings(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::mock_deps;
    use chrono::NaiveDate;

    fn report(start: (i32, u32, u32), end: (i32, u32, u32)) -> PerformanceReport {
        PerformanceReport::new(
            "Weekly performance",
            "ops@example.org",
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
    }

    async fn run(report: &PerformanceReport) -> CheckOutcome {
        let deps = mock_deps();
        let params = serde_json::Value::Null;
        ValidReportPeriodCriterion
            .check(
                report,
                &CheckContext {
                    deps: &deps,
                    params: &params,
                },
            )
            .await
    }

    #[tokio::test]
    async fn two_day_period_passes_the_bounds() {
        let r = report((2024, 1, 1), (2024, 1, 3));
        assert!(run(&r).await.passed());
    }

    #[tokio::test]
    async fn inverted_or_empty_period_is_rejected() {
        let r = report((2024, 1, 3), (2024, 1, 3));
        match run(&r).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "period_invalid"),
            other => panic!("expected failure, got {other:?}"),
        }

        let r = report((2024, 1, 3), (2024, 1, 1));
        assert!(!run(&r).await.passed());
    }

    #[tokio::test]
    async fn period_over_a_year_is_rejected() {
        let r = report((2023, 1, 1), (2024, 6, 1));
        match run(&r).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "period_out_of_range"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn future_period_is_rejected() {
        let r = report((2090, 1, 1), (2090, 1, 8));
        match run(&r).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "period_in_future"),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
