use async_trait::async_trait;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::domains::reports::models::{PerformanceReport, ReportStatus};
use crate::kernel::ServerDeps;

/// Gates re-delivery: only a failed report with budget left may re-attempt.
pub struct ReportRetryCriterion;

#[async_trait]
impl Criterion<PerformanceReport, ServerDeps> for ReportRetryCriterion {
    fn name(&self) -> &'static str {
        "ReportRetryCriterion"
    }

    async fn check(
        &self,
        report: &PerformanceReport,
        _ctx: &CheckContext<'_, ServerDeps>,
    ) -> CheckOutcome {
        if report.report_status != ReportStatus::Failed {
            return CheckOutcome::fail(
                "not_failed",
                format!("report_status is {:?}, nothing to retry", report.report_status),
            );
        }
        if report.retry.exhausted() {
            return CheckOutcome::fail(
                "retries_exhausted",
                format!("all {} retry attempts have been used", report.retry.max_retries),
            );
        }
        CheckOutcome::pass()
    }
}
