use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use turnstile::{EntityId, LifecycleEntity};

/// Workflow states of the pet lifecycle.
pub mod states {
    pub const INITIAL: &str = "initial_state";
    pub const AVAILABLE: &str = "available";
    pub const PENDING: &str = "pending";
    pub const SOLD: &str = "sold";
    pub const UNDER_TREATMENT: &str = "under_treatment";
    pub const RECOVERING: &str = "recovering";
}

/// Adoption progress, tracked as an attribute in parallel with the workflow
/// state (the store flow and the adoption flow share one pet record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdoptionStatus {
    Available,
    Reserved,
    Adopted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    #[serde(rename = "Under Treatment")]
    UnderTreatment,
    Recovering,
}

/// Pet record - one per animal in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: EntityId,
    pub name: String,
    pub species: String,
    pub category: Option<String>,
    pub photo_urls: Vec<String>,
    pub unit_price: f64,

    pub adoption_status: AdoptionStatus,
    pub health_status: HealthStatus,

    pub listed_at: Option<DateTime<Utc>>,
    pub reserved_at: Option<DateTime<Utc>>,
    pub sold_at: Option<DateTime<Utc>>,
}

impl Pet {
    pub fn new(name: &str, species: &str, unit_price: f64) -> Self {
        Self {
            id: EntityId::new(),
            name: name.to_string(),
            species: species.to_string(),
            category: None,
            photo_urls: Vec::new(),
            unit_price,
            adoption_status: AdoptionStatus::Available,
            health_status: HealthStatus::Healthy,
            listed_at: None,
            reserved_at: None,
            sold_at: None,
        }
    }

    /// A pet can be reserved only while adoptable and healthy.
    pub fn is_adoptable(&self) -> bool {
        self.adoption_status == AdoptionStatus::Available
            && self.health_status == HealthStatus::Healthy
    }
}

impl LifecycleEntity for Pet {
    const KIND: &'static str = "pet";

    fn technical_id(&self) -> EntityId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adoptable_requires_available_and_healthy() {
        let mut pet = Pet::new("Biscuit", "dog", 180.0);
        assert!(pet.is_adoptable());

        pet.health_status = HealthStatus::UnderTreatment;
        assert!(!pet.is_adoptable());

        pet.health_status = HealthStatus::Healthy;
        pet.adoption_status = AdoptionStatus::Reserved;
        assert!(!pet.is_adoptable());
    }

    #[test]
    fn health_status_serializes_with_spaced_label() {
        let json = serde_json::to_string(&HealthStatus::UnderTreatment).unwrap();
        assert_eq!(json, "\"Under Treatment\"");
    }
}
