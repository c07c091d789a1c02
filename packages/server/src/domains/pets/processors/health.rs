//! Health-loop processors: treatment, recovery, and return to the catalog.

use async_trait::async_trait;
use tracing::info;
use turnstile::{ProcessContext, ProcessError, ProcessOutcome, Processor};

use crate::domains::pets::models::{HealthStatus, Pet};
use crate::kernel::ServerDeps;

pub struct BeginTreatmentProcessor;

#[async_trait]
impl Processor<Pet, ServerDeps> for BeginTreatmentProcessor {
    fn name(&self) -> &'static str {
        "BeginTreatmentProcessor"
    }

    async fn process(
        &self,
        mut pet: Pet,
        ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<Pet>, ProcessError> {
        pet.health_status = HealthStatus::UnderTreatment;
        let notes = ctx
            .params
            .pointer("/health_data/notes")
            .and_then(|v| v.as_str())
            .unwrap_or("none");
        info!(pet_id = %pet.id, notes, "Pet taken off the catalog for treatment");
        Ok(ProcessOutcome::new(pet))
    }
}

pub struct MarkRecoveringProcessor;

#[async_trait]
impl Processor<Pet, ServerDeps> for MarkRecoveringProcessor {
    fn name(&self) -> &'static str {
        "MarkRecoveringProcessor"
    }

    async fn process(
        &self,
        mut pet: Pet,
        _ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<Pet>, ProcessError> {
        pet.health_status = HealthStatus::Recovering;
        info!(pet_id = %pet.id, "Pet marked recovering");
        Ok(ProcessOutcome::new(pet))
    }
}

pub struct ReturnToAvailabilityProcessor;

#[async_trait]
impl Processor<Pet, ServerDeps> for ReturnToAvailabilityProcessor {
    fn name(&self) -> &'static str {
        "ReturnToAvailabilityProcessor"
    }

    async fn process(
        &self,
        mut pet: Pet,
        _ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<Pet>, ProcessError> {
        pet.health_status = HealthStatus::Healthy;
        info!(pet_id = %pet.id, "Pet cleared and back in the catalog");
        Ok(ProcessOutcome::new(pet))
    }
}
