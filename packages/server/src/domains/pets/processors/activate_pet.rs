//! Activate pet processor - moves a pet into the catalog with listing
//! enrichment from the upstream pet-store API.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};
use turnstile::{ProcessContext, ProcessError, ProcessOutcome, Processor};

use crate::domains::pets::models::Pet;
use crate::kernel::ServerDeps;

pub struct ActivatePetProcessor;

#[async_trait]
impl Processor<Pet, ServerDeps> for ActivatePetProcessor {
    fn name(&self) -> &'static str {
        "ActivatePetProcessor"
    }

    async fn process(
        &self,
        mut pet: Pet,
        ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<Pet>, ProcessError> {
        pet.listed_at = Some(Utc::now());

        // Enrichment is not on the critical path: upstream failure falls back
        // to defaults derived from what we already know.
        if pet.category.is_none() || pet.photo_urls.is_empty() {
            match ctx.deps.petstore.find_by_status("available").await {
                Ok(catalog) => {
                    let matched = catalog
                        .iter()
                        .find(|c| c.name.eq_ignore_ascii_case(&pet.name))
                        .or_else(|| {
                            catalog.iter().find(|c| {
                                c.category
                                    .as_deref()
                                    .is_some_and(|cat| cat.eq_ignore_ascii_case(&pet.species))
                            })
                        });
                    if let Some(entry) = matched {
                        if pet.category.is_none() {
                            pet.category = entry.category.clone();
                        }
                        if pet.photo_urls.is_empty() {
                            pet.photo_urls = entry.photo_urls.clone();
                        }
                        info!(
                            pet_id = %pet.id,
                            category = ?pet.category,
                            "Enriched listing from pet-store catalog"
                        );
                    }
                }
                Err(e) => {
                    warn!(
                        pet_id = %pet.id,
                        error = %e,
                        "Catalog enrichment unavailable; using defaults"
                    );
                }
            }
        }

        // Default-fill whatever enrichment left empty.
        if pet.category.is_none() {
            pet.category = Some(pet.species.clone());
        }
        if pet.photo_urls.is_empty() {
            pet.photo_urls = vec!["https://images.example/placeholder.jpg".to_string()];
        }

        info!(pet_id = %pet.id, name = %pet.name, "Pet listed in catalog");
        Ok(ProcessOutcome::new(pet))
    }
}
