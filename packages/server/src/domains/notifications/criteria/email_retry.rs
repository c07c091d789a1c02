use async_trait::async_trait;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::domains::notifications::models::{EmailNotification, SendStatus};
use crate::kernel::ServerDeps;

/// Gates re-dispatch: only failed sends with retry budget left may re-attempt.
pub struct EmailRetryCriterion;

#[async_trait]
impl Criterion<EmailNotification, ServerDeps> for EmailRetryCriterion {
    fn name(&self) -> &'static str {
        "EmailRetryCriterion"
    }

    async fn check(
        &self,
        mail: &EmailNotification,
        _ctx: &CheckContext<'_, ServerDeps>,
    ) -> CheckOutcome {
        if mail.send_status != SendStatus::Failed {
            return CheckOutcome::fail(
                "not_failed",
                format!("send_status is {:?}, nothing to retry", mail.send_status),
            );
        }
        if mail.retry.exhausted() {
            return CheckOutcome::fail(
                "retries_exhausted",
                format!(
                    "all {} retry attempts have been used",
                    mail.retry.max_retries
                ),
            );
        }
        CheckOutcome::pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::mock_deps;

    async fn run(mail: &EmailNotification) -> CheckOutcome {
        let deps = mock_deps();
        let params = serde_json::Value::Null;
        EmailRetryCriterion
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
    async fn successful_send_cannot_be_retried() {
        let mut mail = EmailNotification::new("ops@example.org", "weekly", "body");
        mail.send_status = SendStatus::Sent;
        match run(&mail).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "not_failed"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn exhausted_budget_blocks_retry() {
        let mut mail = EmailNotification::new("ops@example.org", "weekly", "body");
        mail.send_status = SendStatus::Failed;
        while !mail.retry.exhausted() {
            mail.retry.record_failure();
        }
        match run(&mail).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "retries_exhausted"),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
