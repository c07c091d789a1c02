use async_trait::async_trait;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::domains::reports::models::PerformanceReport;
use crate::kernel::ServerDeps;

/// Gates rendering: the aggregated numbers must be internally consistent.
pub struct ReportStatisticsCriterion;

#[async_trait]
impl Criterion<PerformanceReport, ServerDeps> for ReportStatisticsCriterion {
    fn name(&self) -> &'static str {
        "ReportStatisticsCriterion"
    }

    async fn check(
        &self,
        report: &PerformanceReport,
        _ctx: &CheckContext<'_, ServerDeps>,
    ) -> CheckOutcome {
        let Some(stats) = &report.statistics else {
            return CheckOutcome::fail("statistics_missing", "report has not been aggregated");
        };

        if stats.available_pets > stats.total_pets {
            return CheckOutcome::fail(
                "counts_inconsistent",
                format!(
                    "available_pets {} exceeds total_pets {}",
                    stats.available_pets, stats.total_pets
                ),
            );
        }
        if stats.total_revenue < 0.0 || stats.average_order_value < 0.0 {
            return CheckOutcome::fail("revenue_negative", "revenue figures must be >= 0");
        }
        if stats.top_performers.len() > 5 {
            return CheckOutcome::fail(
                "top_performers_overflow",
                "top performers list must hold at most five categories",
            );
        }

        let mut warnings = Vec::new();
        if stats.total_pets == 0 {
            warnings.push("report covers an empty catalog".to_string());
        }
        CheckOutcome::pass_with_warnings(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::reports::models::ReportStatistics;
    use crate::kernel::test_dependencies::mock_deps;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn aggregated(total: u32, available: u32) -> PerformanceReport {
        let mut report = PerformanceReport::new(
            "Weekly performance",
            "ops@example.org",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        );
        report.statistics = Some(ReportStatistics {
            total_pets: total,
            available_pets: available,
            total_orders: 0,
            delivered_orders: 0,
            total_revenue: 0.0,
            average_order_value: 0.0,
            store_inventory: HashMap::new(),
            categories: Vec::new(),
            top_performers: Vec::new(),
            slow_movers: Vec::new(),
            restock: Vec::new(),
            trend_summary: String::new(),
            recommendations: Vec::new(),
        });
        report
    }

    async fn run(report: &PerformanceReport) -> CheckOutcome {
        let deps = mock_deps();
        let params = serde_json::Value::Null;
        ReportStatisticsCriterion
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
    async fn unaggregated_report_cannot_render() {
        let report = PerformanceReport::new(
            "Weekly performance",
            "ops@example.org",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        );
        match run(&report).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "statistics_missing"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn more_available_than_total_is_inconsistent() {
        match run(&aggregated(3, 5)).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "counts_inconsistent"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn consistent_counts_pass() {
        assert!(run(&aggregated(5, 3)).await.passed());
    }
}
