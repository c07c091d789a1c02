//! Simulated SMTP delivery with a logged preview.
//!
//! No durable delivery guarantee: the preview lands in the logs and the call
//! returns Ok. A real transport would live behind the same `BaseEmailService`
//! seam, configured from `SMTP_FROM_ADDRESS` and friends.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::{BaseEmailService, EmailMessage};

const PREVIEW_CHARS: usize = 160;

pub struct SimulatedEmailService {
    from_address: String,
}

impl SimulatedEmailService {
    pub fn new(from_address: &str) -> Self {
        Self {
            from_address: from_address.to_string(),
        }
    }
}

#[async_trait]
impl BaseEmailService for SimulatedEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let preview: String = message.html_body.chars().take(PREVIEW_CHARS).collect();
        info!(
            from = %self.from_address,
            to = %message.to,
            subject = %message.subject,
            body_chars = message.html_body.chars().count(),
            "Simulated email dispatch: {preview}"
        );
        Ok(())
    }
}
