use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use turnstile::{EntityId, LifecycleEntity};

/// Workflow states of the warehouse fulfillment lifecycle. Uppercase names
/// are this schema's convention; it predates the store order model and the
/// two are intentionally separate entity kinds.
pub mod states {
    pub const WAITING_TO_FULFILL: &str = "WAITING_TO_FULFILL";
    pub const PICKING: &str = "PICKING";
    pub const WAITING_TO_SEND: &str = "WAITING_TO_SEND";
    pub const SENT: &str = "SENT";
    pub const DELIVERED: &str = "DELIVERED";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentLine {
    pub sku: String,
    pub description: String,
    pub quantity: u32,
}

/// Warehouse fulfillment order - second of the two order schemas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentOrder {
    pub id: EntityId,
    pub reference: String,
    pub lines: Vec<FulfillmentLine>,

    pub courier: Option<String>,
    pub tracking_code: Option<String>,

    pub picking_started_at: Option<DateTime<Utc>>,
    pub picked_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl FulfillmentOrder {
    pub fn new(reference: &str, lines: Vec<FulfillmentLine>) -> Self {
        Self {
            id: EntityId::new(),
            reference: reference.to_string(),
            lines,
            courier: None,
            tracking_code: None,
            picking_started_at: None,
            picked_at: None,
            sent_at: None,
            delivered_at: None,
        }
    }

    pub fn total_units(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

impl LifecycleEntity for FulfillmentOrder {
    const KIND: &'static str = "fulfillment_order";

    fn technical_id(&self) -> EntityId {
        self.id
    }
}
