use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use turnstile::{EntityId, LifecycleEntity, RetryState};

/// Workflow states of the report lifecycle. Delivery progress lives in the
/// `report_status` attribute, mirroring the notification model.
pub mod states {
    pub const REQUESTED: &str = "requested";
    pub const AGGREGATED: &str = "aggregated";
    pub const RENDERED: &str = "rendered";
    pub const DELIVERED: &str = "delivered";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Sent,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestockUrgency {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub pet_count: u32,
    pub available_pets: u32,
    pub units_sold: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestockRecommendation {
    pub category: String,
    pub available: u32,
    pub urgency: RestockUrgency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStatistics {
    pub total_pets: u32,
    pub available_pets: u32,
    pub total_orders: u32,
    pub delivered_orders: u32,
    pub total_revenue: f64,
    pub average_order_value: f64,
    /// Snapshot of the upstream store inventory; empty when the store API
    /// was unreachable (conservative zero-inventory fallback).
    pub store_inventory: HashMap<String, i64>,
    pub categories: Vec<CategoryStats>,
    /// Top categories by units sold, at most five.
    pub top_performers: Vec<CategoryStats>,
    /// Categories below the sales-velocity threshold.
    pub slow_movers: Vec<String>,
    pub restock: Vec<RestockRecommendation>,
    pub trend_summary: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub id: EntityId,
    pub title: String,
    pub recipient_email: String,
    pub report_period_start: NaiveDate,
    pub report_period_end: NaiveDate,

    pub report_status: ReportStatus,
    #[serde(flatten)]
    pub retry: RetryState,
    pub last_error: Option<String>,

    pub statistics: Option<ReportStatistics>,
    pub html_body: Option<String>,

    pub generated_at: Option<DateTime<Utc>>,
    pub email_sent_at: Option<DateTime<Utc>>,
}

impl PerformanceReport {
    pub fn new(
        title: &str,
        recipient_email: &str,
        report_period_start: NaiveDate,
        report_period_end: NaiveDate,
    ) -> Self {
        Self {
            id: EntityId::new(),
            title: title.to_string(),
            recipient_email: recipient_email.to_string(),
            report_period_start,
            report_period_end,
            report_status: ReportStatus::Pending,
            retry: RetryState::default(),
            last_error: None,
            statistics: None,
            html_body: None,
            generated_at: None,
            email_sent_at: None,
        }
    }

    pub fn period_days(&self) -> i64 {
        (self.report_period_end - self.report_period_start).num_days()
    }

    pub fn can_retry(&self) -> bool {
        self.report_status == ReportStatus::Failed && !self.retry.exhausted()
    }
}

impl LifecycleEntity for PerformanceReport {
    const KIND: &'static str = "performance_report";

    fn technical_id(&self) -> EntityId {
        self.id
    }
}
