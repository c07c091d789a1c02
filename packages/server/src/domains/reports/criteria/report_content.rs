use async_trait::async_trait;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::common::validate::is_valid_email;
use crate::domains::reports::models::{PerformanceReport, ReportStatus};
use crate::kernel::ServerDeps;

/// Below this many characters the rendered report is suspiciously thin.
const SHORT_CONTENT_CHARS: usize = 200;

/// Gates delivery: recipient, rendered content, and status bookkeeping.
pub struct ReportContentCriterion;

#[async_trait]
impl Criterion<PerformanceReport, ServerDeps> for ReportContentCriterion {
    fn name(&self) -> &'static str {
        "ReportContentCriterion"
    }

    async fn check(
        &self,
        report: &PerformanceReport,
        ctx: &CheckContext<'_, ServerDeps>,
    ) -> CheckOutcome {
        if report.recipient_email.trim().is_empty() {
            return CheckOutcome::fail("recipient_missing", "report recipient is required");
        }
        if !is_valid_email(&report.recipient_email) {
            return CheckOutcome::fail(
                "recipient_invalid",
                format!("'{}' is not a valid email address", report.recipient_email),
            );
        }
        let Some(html) = &report.html_body else {
            return CheckOutcome::fail("content_missing", "report has not been rendered");
        };
        if !report.retry.in_bounds() {
            return CheckOutcome::fail(
                "retry_out_of_bounds",
                format!(
                    "retry_count {} exceeds max_retries {}",
                    report.retry.retry_count, report.retry.max_retries
                ),
            );
        }

        // State-correlated business rule: a sent report carries its send
        // timestamp.
        if report.report_status == ReportStatus::Sent && report.email_sent_at.is_none() {
            return CheckOutcome::fail(
                "sent_without_timestamp",
                "report_status is sent but email_sent_at is empty",
            );
        }

        // Advisory findings: thin content and off-mailbox recipients ship
        // anyway, with a note.
        let mut warnings = Vec::new();
        if html.chars().count() < SHORT_CONTENT_CHARS {
            warnings.push(format!(
                "rendered report is only {} chars; check the aggregation window",
                html.chars().count()
            ));
        }
        if report.recipient_email != ctx.deps.ops_mailbox {
            warnings.push(format!(
                "recipient differs from the recommended ops mailbox {}",
                ctx.deps.ops_mailbox
            ));
        }
        CheckOutcome::pass_with_warnings(warnings)
    }
}
