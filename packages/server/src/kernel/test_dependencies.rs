// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.
// Mocks capture their calls and can be preloaded with canned responses or
// injected failures via with_* builders.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{
    BaseEmailService, BasePaymentGateway, BasePetstoreApi, BaseWeatherApi, CatalogPet,
    ClimateDaily, ClimateStation, EmailMessage, PaymentDecision, ServerDeps,
};

// =============================================================================
// Mock Email Service
// =============================================================================

pub struct MockEmailService {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    /// Number of upcoming send calls that should fail
    failures_remaining: Arc<Mutex<u32>>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            failures_remaining: Arc::new(Mutex::new(0)),
        }
    }

    /// Make the next `count` send calls fail with a transport error
    pub fn with_failures(self, count: u32) -> Self {
        *self.failures_remaining.lock().unwrap() = count;
        self
    }

    /// Get all messages that were delivered
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseEmailService for MockEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let mut failures = self.failures_remaining.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(anyhow!("smtp connection refused"));
        }
        drop(failures);
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

// =============================================================================
// Mock Payment Gateway
// =============================================================================

/// Arguments captured from an authorize call
#[derive(Debug, Clone)]
pub struct AuthorizeCallArgs {
    pub reference: String,
    pub amount: f64,
}

pub struct MockPaymentGateway {
    calls: Arc<Mutex<Vec<AuthorizeCallArgs>>>,
    decisions: Arc<Mutex<Vec<PaymentDecision>>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            decisions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a canned decision; once the queue is empty every call approves
    pub fn with_decision(self, decision: PaymentDecision) -> Self {
        self.decisions.lock().unwrap().push(decision);
        self
    }

    pub fn declining(self, reason: &str) -> Self {
        self.with_decision(PaymentDecision {
            approved: false,
            transaction_id: None,
            reason: Some(reason.to_string()),
        })
    }

    /// Get all authorize calls with their arguments
    pub fn authorize_calls(&self) -> Vec<AuthorizeCallArgs> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePaymentGateway for MockPaymentGateway {
    async fn authorize(&self, reference: &str, amount: f64) -> Result<PaymentDecision> {
        self.calls.lock().unwrap().push(AuthorizeCallArgs {
            reference: reference.to_string(),
            amount,
        });
        let mut decisions = self.decisions.lock().unwrap();
        if decisions.is_empty() {
            Ok(PaymentDecision {
                approved: true,
                transaction_id: Some(format!("txn-mock-{}", self.calls.lock().unwrap().len())),
                reason: None,
            })
        } else {
            Ok(decisions.remove(0))
        }
    }
}

// =============================================================================
// Mock Pet-Store API
// =============================================================================

pub struct MockPetstoreApi {
    pets: Arc<Mutex<Vec<CatalogPet>>>,
    inventory: Arc<Mutex<HashMap<String, i64>>>,
    fail_requests: Arc<Mutex<bool>>,
    status_calls: Arc<Mutex<Vec<String>>>,
}

impl MockPetstoreApi {
    pub fn new() -> Self {
        Self {
            pets: Arc::new(Mutex::new(Vec::new())),
            inventory: Arc::new(Mutex::new(HashMap::new())),
            fail_requests: Arc::new(Mutex::new(false)),
            status_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_pet(self, name: &str, category: &str, status: &str) -> Self {
        self.pets.lock().unwrap().push(CatalogPet {
            name: name.to_string(),
            category: Some(category.to_string()),
            photo_urls: vec![format!("https://images.example/{}.jpg", name)],
            status: status.to_string(),
        });
        self
    }

    pub fn with_inventory(self, status: &str, count: i64) -> Self {
        self.inventory.lock().unwrap().insert(status.to_string(), count);
        self
    }

    /// Make every request fail (simulates the upstream being down)
    pub fn unreachable(self) -> Self {
        *self.fail_requests.lock().unwrap() = true;
        self
    }

    /// Get all statuses that were queried
    pub fn status_calls(&self) -> Vec<String> {
        self.status_calls.lock().unwrap().clone()
    }
}

impl Default for MockPetstoreApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePetstoreApi for MockPetstoreApi {
    async fn find_by_status(&self, status: &str) -> Result<Vec<CatalogPet>> {
        self.status_calls.lock().unwrap().push(status.to_string());
        if *self.fail_requests.lock().unwrap() {
            return Err(anyhow!("connection timed out"));
        }
        Ok(self
            .pets
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.status == status)
            .cloned()
            .collect())
    }

    async fn store_inventory(&self) -> Result<HashMap<String, i64>> {
        if *self.fail_requests.lock().unwrap() {
            return Err(anyhow!("connection timed out"));
        }
        Ok(self.inventory.lock().unwrap().clone())
    }
}

// =============================================================================
// Mock Weather API
// =============================================================================

pub struct MockWeatherApi {
    stations: Arc<Mutex<Vec<ClimateStation>>>,
    daily: Arc<Mutex<Vec<ClimateDaily>>>,
    fail_requests: Arc<Mutex<bool>>,
}

impl MockWeatherApi {
    pub fn new() -> Self {
        Self {
            stations: Arc::new(Mutex::new(Vec::new())),
            daily: Arc::new(Mutex::new(Vec::new())),
            fail_requests: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_station(self, station: ClimateStation) -> Self {
        self.stations.lock().unwrap().push(station);
        self
    }

    pub fn with_daily(self, record: ClimateDaily) -> Self {
        self.daily.lock().unwrap().push(record);
        self
    }

    pub fn unreachable(self) -> Self {
        *self.fail_requests.lock().unwrap() = true;
        self
    }
}

impl Default for MockWeatherApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseWeatherApi for MockWeatherApi {
    async fn climate_stations(
        &self,
        province: &str,
        limit: usize,
    ) -> Result<Vec<ClimateStation>> {
        if *self.fail_requests.lock().unwrap() {
            return Err(anyhow!("connection timed out"));
        }
        Ok(self
            .stations
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.province_code == province)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn climate_daily(
        &self,
        climate_identifier: &str,
        limit: usize,
    ) -> Result<Vec<ClimateDaily>> {
        if *self.fail_requests.lock().unwrap() {
            return Err(anyhow!("connection timed out"));
        }
        Ok(self
            .daily
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.climate_identifier == climate_identifier)
            .take(limit)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Assembled test deps
// =============================================================================

/// ServerDeps wired entirely with fresh mocks. Tests that need to inspect a
/// mock should construct it themselves and pass it in via ServerDeps::new.
pub fn mock_deps() -> ServerDeps {
    ServerDeps::new(
        Arc::new(MockEmailService::new()),
        Arc::new(MockPaymentGateway::new()),
        Arc::new(MockPetstoreApi::new()),
        Arc::new(MockWeatherApi::new()),
        "ops@harborlane.dev".to_string(),
        None,
    )
}
