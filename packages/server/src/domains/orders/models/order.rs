use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use turnstile::{EntityId, LifecycleEntity};

use crate::domains::pets::models::Pet;

/// Workflow states of the store order lifecycle.
pub mod states {
    pub const INITIAL: &str = "initial_state";
    pub const PLACED: &str = "placed";
    pub const APPROVED: &str = "approved";
    pub const PROCESSING: &str = "processing";
    pub const DELIVERED: &str = "delivered";
}

/// Attribute-level order status mirror, validated by the order criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Placed,
    Approved,
    Processing,
    Delivered,
}

/// Store order - first of the two order schemas. The fulfillment variant is a
/// separate entity kind with its own machine; the two are never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: EntityId,
    pub pet_id: EntityId,
    pub buyer_email: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_amount: Option<f64>,
    pub status: OrderStatus,

    pub payment_transaction_id: Option<String>,
    pub tracking_number: Option<String>,
    pub restock_quantity: Option<u32>,

    pub placed_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub complete: bool,
}

impl Order {
    pub fn new(pet: &Pet, buyer_email: &str, quantity: u32) -> Self {
        Self {
            id: EntityId::new(),
            pet_id: pet.id,
            buyer_email: buyer_email.to_string(),
            quantity,
            unit_price: pet.unit_price,
            total_amount: None,
            status: OrderStatus::New,
            payment_transaction_id: None,
            tracking_number: None,
            restock_quantity: None,
            placed_at: None,
            approved_at: None,
            delivered_at: None,
            complete: false,
        }
    }

    pub fn computed_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

impl LifecycleEntity for Order {
    const KIND: &'static str = "order";

    fn technical_id(&self) -> EntityId {
        self.id
    }
}
