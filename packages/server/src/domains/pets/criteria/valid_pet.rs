use async_trait::async_trait;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::domains::pets::models::Pet;
use crate::kernel::ServerDeps;

/// Upper bound on a believable listing price; anything above is treated as a
/// data-entry error, not a luxury animal.
const MAX_UNIT_PRICE: f64 = 50_000.0;

/// Gates a pet's entry into the catalog.
pub struct ValidPetCriterion;

#[async_trait]
impl Criterion<Pet, ServerDeps> for ValidPetCriterion {
    fn name(&self) -> &'static str {
        "ValidPetCriterion"
    }

    async fn check(&self, pet: &Pet, _ctx: &CheckContext<'_, ServerDeps>) -> CheckOutcome {
        // Required fields
        if pet.name.trim().is_empty() {
            return CheckOutcome::fail("name_missing", "pet name is required");
        }
        if pet.species.trim().is_empty() {
            return CheckOutcome::fail("species_missing", "pet species is required");
        }

        // Ranges
        if pet.unit_price <= 0.0 {
            return CheckOutcome::fail(
                "price_out_of_range",
                format!("unit price must be positive, got {}", pet.unit_price),
            );
        }
        if pet.unit_price > MAX_UNIT_PRICE {
            return CheckOutcome::fail(
                "price_out_of_range",
                format!(
                    "unit price {} exceeds the plausible maximum {}",
                    pet.unit_price, MAX_UNIT_PRICE
                ),
            );
        }

        // Advisory only: a bare listing is allowed but worth flagging.
        let mut warnings = Vec::new();
        if pet.photo_urls.is_empty() {
            warnings.push("listing has no photos".to_string());
        }
        if pet.category.is_none() {
            warnings.push("listing has no category; activation will try to fill it".to_string());
        }
        CheckOutcome::pass_with_warnings(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::mock_deps;

    async fn run(pet: &Pet) -> CheckOutcome {
        let deps = mock_deps();
        let params = serde_json::Value::Null;
        ValidPetCriterion
            .check(
                pet,
                &CheckContext {
                    deps: &deps,
                    params: &params,
                },
            )
            .await
    }

    #[tokio::test]
    async fn rejects_missing_name() {
        let pet = Pet::new("", "dog", 100.0);
        match run(&pet).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "name_missing"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejects_non_positive_price() {
        let pet = Pet::new("Biscuit", "dog", 0.0);
        match run(&pet).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "price_out_of_range"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn bare_listing_passes_with_warnings() {
        let pet = Pet::new("Biscuit", "dog", 100.0);
        match run(&pet).await {
            CheckOutcome::Pass { warnings } => assert_eq!(warnings.len(), 2),
            other => panic!("expected pass, got {other:?}"),
        }
    }
}
