//! Server dependencies for criteria and processors (using traits for testability)
//!
//! This module provides the central dependency container injected into every
//! state machine. All external services use trait abstractions to enable
//! testing with deterministic doubles instead of monkey-patching.

use std::sync::Arc;

use crate::config::Config;
use crate::kernel::{
    email::SimulatedEmailService, geomet_client::GeoMetClient, payment::SimulatedPaymentGateway,
    petstore_client::PetstoreClient, BaseEmailService, BasePaymentGateway, BasePetstoreApi,
    BaseWeatherApi,
};

/// Dependencies accessible to criteria and processors
#[derive(Clone)]
pub struct ServerDeps {
    pub email: Arc<dyn BaseEmailService>,
    pub payment: Arc<dyn BasePaymentGateway>,
    pub petstore: Arc<dyn BasePetstoreApi>,
    pub weather: Arc<dyn BaseWeatherApi>,
    /// Mailbox the content criteria recommend as a report recipient
    pub ops_mailbox: String,
    /// Default recipient for generated reports when the entity names none
    pub report_recipient: Option<String>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        email: Arc<dyn BaseEmailService>,
        payment: Arc<dyn BasePaymentGateway>,
        petstore: Arc<dyn BasePetstoreApi>,
        weather: Arc<dyn BaseWeatherApi>,
        ops_mailbox: String,
        report_recipient: Option<String>,
    ) -> Self {
        Self {
            email,
            payment,
            petstore,
            weather,
            ops_mailbox,
            report_recipient,
        }
    }

    /// Wire the live services from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            email: Arc::new(SimulatedEmailService::new(&config.smtp_from_address)),
            payment: Arc::new(SimulatedPaymentGateway::new(config.payment_ceiling)),
            petstore: Arc::new(PetstoreClient::new(&config.petstore_api_url)),
            weather: Arc::new(GeoMetClient::new(&config.geomet_api_url)),
            ops_mailbox: config.ops_mailbox.clone(),
            report_recipient: config.report_recipient.clone(),
        }
    }
}
