use async_trait::async_trait;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::common::validate::is_valid_email;
use crate::domains::notifications::models::{EmailNotification, SendStatus};
use crate::kernel::ServerDeps;

const MAX_SUBJECT_CHARS: usize = 120;

/// Gates dispatch of a notification.
pub struct ValidEmailCriterion;

#[async_trait]
impl Criterion<EmailNotification, ServerDeps> for ValidEmailCriterion {
    fn name(&self) -> &'static str {
        "ValidEmailCriterion"
    }

    async fn check(
        &self,
        mail: &EmailNotification,
        _ctx: &CheckContext<'_, ServerDeps>,
    ) -> CheckOutcome {
        // Required fields
        if mail.recipient.trim().is_empty() {
            return CheckOutcome::fail("recipient_missing", "recipient is required");
        }
        if mail.subject.trim().is_empty() {
            return CheckOutcome::fail("subject_missing", "subject is required");
        }
        if mail.body.trim().is_empty() {
            return CheckOutcome::fail("body_missing", "body is required");
        }

        // Formats and ranges
        if !is_valid_email(&mail.recipient) {
            return CheckOutcome::fail(
                "recipient_invalid",
                format!("'{}' is not a valid email address", mail.recipient),
            );
        }
        if !mail.retry.in_bounds() {
            return CheckOutcome::fail(
                "retry_out_of_bounds",
                format!(
                    "retry_count {} exceeds max_retries {}",
                    mail.retry.retry_count, mail.retry.max_retries
                ),
            );
        }

        // Cross-field consistency
        if let (Some(sent), Some(delivered)) = (mail.actual_send_time, mail.delivered_at) {
            if sent > delivered {
                return CheckOutcome::fail(
                    "timestamps_out_of_order",
                    format!("send time {} is after delivery receipt {}", sent, delivered),
                );
            }
        }

        // State-correlated business rule: a sent notification must carry its
        // send timestamp.
        if mail.send_status == SendStatus::Sent && mail.actual_send_time.is_none() {
            return CheckOutcome::fail(
                "sent_without_timestamp",
                "send_status is sent but actual_send_time is empty",
            );
        }

        let mut warnings = Vec::new();
        if mail.subject.chars().count() > MAX_SUBJECT_CHARS {
            warnings.push(format!(
                "subject is {} chars; most clients truncate around {}",
                mail.subject.chars().count(),
                MAX_SUBJECT_CHARS
            ));
        }
        CheckOutcome::pass_with_warnings(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::mock_deps;
    use chrono::Utc;

    async fn run(mail: &EmailNotification) -> CheckOutcome {
        let deps = mock_deps();
        let params = serde_json::Value::Null;
        ValidEmailCriterion
            .check(
                mail,
                &CheckContext {
                    deps: &deps,
                    params: &params,
                },
            )
            .await
    }

    #[tokio::test]
    async fn sent_without_timestamp_is_rejected() {
        let mut mail = EmailNotification::new("ops@example.org", "weekly", "report attached");
        mail.send_status = SendStatus::Sent;
        mail.actual_send_time = None;
        match run(&mail).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "sent_without_timestamp"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_after_delivery_receipt_is_rejected() {
        let mut mail = EmailNotification::new("ops@example.org", "weekly", "report attached");
        let now = Utc::now();
        mail.actual_send_time = Some(now);
        mail.delivered_at = Some(now - chrono::Duration::minutes(5));
        match run(&mail).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "timestamps_out_of_order"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn well_formed_pending_mail_passes() {
        let mail = EmailNotification::new("ops@example.org", "weekly", "report attached");
        assert!(run(&mail).await.passed());
    }
}
