use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub petstore_api_url: String,
    pub geomet_api_url: String,
    pub smtp_from_address: String,
    pub ops_mailbox: String,
    pub report_recipient: Option<String>,
    pub payment_ceiling: f64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            petstore_api_url: env::var("PETSTORE_API_URL")
                .unwrap_or_else(|_| "https://petstore3.swagger.io/api/v3".to_string()),
            geomet_api_url: env::var("GEOMET_API_URL")
                .unwrap_or_else(|_| "https://api.weather.gc.ca".to_string()),
            smtp_from_address: env::var("SMTP_FROM_ADDRESS")
                .unwrap_or_else(|_| "reports@harborlane.dev".to_string()),
            ops_mailbox: env::var("OPS_MAILBOX")
                .unwrap_or_else(|_| "ops@harborlane.dev".to_string()),
            report_recipient: env::var("REPORT_RECIPIENT").ok(),
            payment_ceiling: env::var("PAYMENT_CEILING")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("PAYMENT_CEILING must be a valid number")?,
        })
    }
}
