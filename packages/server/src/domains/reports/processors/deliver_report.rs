//! Report delivery - one email attempt with absorbed failure, mirroring the
//! notification dispatch model.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};
use turnstile::{ProcessContext, ProcessError, ProcessOutcome, Processor};

use crate::domains::reports::models::{PerformanceReport, ReportStatus};
use crate::kernel::{EmailMessage, ServerDeps};

pub struct DeliverReportProcessor;

#[async_trait]
impl Processor<PerformanceReport, ServerDeps> for DeliverReportProcessor {
    fn name(&self) -> &'static str {
        "DeliverReportProcessor"
    }

    async fn process(
        &self,
        mut report: PerformanceReport,
        ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<PerformanceReport>, ProcessError> {
        let html_body = report.html_body.clone().ok_or_else(|| {
            ProcessError::Precondition("report has no rendered content".to_string())
        })?;

        let message = EmailMessage {
            to: report.recipient_email.clone(),
            subject: report.title.clone(),
            html_body,
        };

        match ctx.deps.email.send(&message).await {
            Ok(()) => {
                report.report_status = ReportStatus::Sent;
                report.email_sent_at = Some(Utc::now());
                report.last_error = None;
                info!(
                    report_id = %report.id,
                    recipient = %report.recipient_email,
                    "Report delivered"
                );
            }
            Err(e) => {
                report.report_status = ReportStatus::Failed;
                report.retry.record_failure();
                report.last_error = Some(e.to_string());
                warn!(
                    report_id = %report.id,
                    recipient = %report.recipient_email,
                    retry_count = report.retry.retry_count,
                    error = %e,
                    "Report delivery failed; recorded for retry"
                );
            }
        }
        Ok(ProcessOutcome::new(report))
    }
}
