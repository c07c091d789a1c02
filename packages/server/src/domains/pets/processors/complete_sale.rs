//! Complete sale processor - final step of both the store and adoption flows.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use turnstile::{ProcessContext, ProcessError, ProcessOutcome, Processor};

use crate::domains::pets::models::{AdoptionStatus, Pet};
use crate::kernel::ServerDeps;

pub struct CompleteSaleProcessor;

#[async_trait]
impl Processor<Pet, ServerDeps> for CompleteSaleProcessor {
    fn name(&self) -> &'static str {
        "CompleteSaleProcessor"
    }

    async fn process(
        &self,
        mut pet: Pet,
        _ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<Pet>, ProcessError> {
        pet.adoption_status = AdoptionStatus::Adopted;
        pet.sold_at = Some(Utc::now());

        // Log-only notification; no durable delivery guarantee.
        info!(
            pet_id = %pet.id,
            name = %pet.name,
            "Notifying adopter: congratulations, the adoption is complete"
        );
        Ok(ProcessOutcome::new(pet))
    }
}
