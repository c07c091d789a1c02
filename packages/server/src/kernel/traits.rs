// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "approve this order") lives in domain processors that
// use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseEmailService)

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

// =============================================================================
// Email Trait (Infrastructure - outbound mail)
// =============================================================================

/// An outbound email, already rendered.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[async_trait]
pub trait BaseEmailService: Send + Sync {
    /// Deliver one message. Err means the attempt failed and may be retried
    /// by the caller's own retry bookkeeping.
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

// =============================================================================
// Payment Gateway Trait (Infrastructure)
// =============================================================================

/// Outcome of a payment authorization attempt.
///
/// A decline is a normal decision, not a transport error; transport errors
/// come back as Err.
#[derive(Debug, Clone)]
pub struct PaymentDecision {
    pub approved: bool,
    pub transaction_id: Option<String>,
    pub reason: Option<String>,
}

#[async_trait]
pub trait BasePaymentGateway: Send + Sync {
    async fn authorize(&self, reference: &str, amount: f64) -> Result<PaymentDecision>;
}

// =============================================================================
// Pet-Store Catalog Trait (Infrastructure - third-party REST API)
// =============================================================================

/// One catalog entry from the upstream pet-store API.
#[derive(Debug, Clone)]
pub struct CatalogPet {
    pub name: String,
    pub category: Option<String>,
    pub photo_urls: Vec<String>,
    pub status: String,
}

#[async_trait]
pub trait BasePetstoreApi: Send + Sync {
    /// `GET /pet/findByStatus`
    async fn find_by_status(&self, status: &str) -> Result<Vec<CatalogPet>>;

    /// `GET /store/inventory` - status tag to count
    async fn store_inventory(&self) -> Result<HashMap<String, i64>>;
}

// =============================================================================
// Weather API Trait (Infrastructure - MSC GeoMet climate collections)
// =============================================================================

#[derive(Debug, Clone)]
pub struct ClimateStation {
    pub climate_identifier: String,
    pub station_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub province_code: String,
    pub first_year: i32,
    pub last_year: i32,
}

#[derive(Debug, Clone)]
pub struct ClimateDaily {
    pub climate_identifier: String,
    pub date: NaiveDate,
    pub temperature_min: Option<f64>,
    pub temperature_mean: Option<f64>,
    pub temperature_max: Option<f64>,
    pub total_precipitation: Option<f64>,
}

#[async_trait]
pub trait BaseWeatherApi: Send + Sync {
    /// `GET /collections/climate-stations/items`
    async fn climate_stations(&self, province: &str, limit: usize)
        -> Result<Vec<ClimateStation>>;

    /// `GET /collections/climate-daily/items` for one station, newest first
    async fn climate_daily(&self, climate_identifier: &str, limit: usize)
        -> Result<Vec<ClimateDaily>>;
}
