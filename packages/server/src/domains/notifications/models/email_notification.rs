use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use turnstile::{EntityId, LifecycleEntity, RetryState};

/// Workflow states of the notification lifecycle. Delivery progress lives in
/// the `send_status` attribute, which is what the criteria validate.
pub mod states {
    pub const QUEUED: &str = "queued";
    pub const DISPATCHED: &str = "dispatched";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendStatus {
    Pending,
    Sent,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailNotification {
    pub id: EntityId,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub priority: Priority,

    pub send_status: SendStatus,
    #[serde(flatten)]
    pub retry: RetryState,
    pub last_error: Option<String>,

    pub queued_at: DateTime<Utc>,
    pub actual_send_time: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl EmailNotification {
    pub fn new(recipient: &str, subject: &str, body: &str) -> Self {
        Self {
            id: EntityId::new(),
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            priority: Priority::Normal,
            send_status: SendStatus::Pending,
            retry: RetryState::default(),
            last_error: None,
            queued_at: Utc::now(),
            actual_send_time: None,
            delivered_at: None,
        }
    }

    /// A re-attempt is allowed only for a failed send with budget left.
    pub fn can_retry(&self) -> bool {
        self.send_status == SendStatus::Failed && !self.retry.exhausted()
    }
}

impl LifecycleEntity for EmailNotification {
    const KIND: &'static str = "email_notification";

    fn technical_id(&self) -> EntityId {
        self.id
    }
}
