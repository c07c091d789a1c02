//! Email dispatch - one delivery attempt with absorbed failure.
//!
//! A transport failure is recorded on the entity (status, counter, error)
//! instead of aborting the transition; the retry criterion gates any
//! re-attempt by a later transition.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};
use turnstile::{ProcessContext, ProcessError, ProcessOutcome, Processor};

use crate::domains::notifications::models::{EmailNotification, SendStatus};
use crate::kernel::{EmailMessage, ServerDeps};

pub struct DispatchEmailProcessor;

#[async_trait]
impl Processor<EmailNotification, ServerDeps> for DispatchEmailProcessor {
    fn name(&self) -> &'static str {
        "DispatchEmailProcessor"
    }

    async fn process(
        &self,
        mut mail: EmailNotification,
        ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<EmailNotification>, ProcessError> {
        let message = EmailMessage {
            to: mail.recipient.clone(),
            subject: mail.subject.clone(),
            html_body: format!("<p>{}</p>", mail.body),
        };

        match ctx.deps.email.send(&message).await {
            Ok(()) => {
                mail.send_status = SendStatus::Sent;
                mail.actual_send_time = Some(Utc::now());
                mail.last_error = None;
                info!(mail_id = %mail.id, recipient = %mail.recipient, "Notification sent");
            }
            Err(e) => {
                mail.send_status = SendStatus::Failed;
                mail.retry.record_failure();
                mail.last_error = Some(e.to_string());
                warn!(
                    mail_id = %mail.id,
                    recipient = %mail.recipient,
                    retry_count = mail.retry.retry_count,
                    error = %e,
                    "Notification delivery failed; recorded for retry"
                );
            }
        }
        Ok(ProcessOutcome::new(mail))
    }
}
