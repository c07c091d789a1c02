use async_trait::async_trait;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::domains::pets::models::{HealthStatus, Pet};
use crate::kernel::ServerDeps;

/// Gates the return from the health loop to the catalog. A pet still under
/// treatment never returns; a recovering pet needs a veterinary clearance
/// passed in the transition's `health_data` parameters.
pub struct PetHealthyCriterion;

#[async_trait]
impl Criterion<Pet, ServerDeps> for PetHealthyCriterion {
    fn name(&self) -> &'static str {
        "PetHealthyCriterion"
    }

    async fn check(&self, pet: &Pet, ctx: &CheckContext<'_, ServerDeps>) -> CheckOutcome {
        if pet.health_status == HealthStatus::UnderTreatment {
            return CheckOutcome::fail(
                "still_under_treatment",
                "pet is under treatment and cannot return to the catalog",
            );
        }

        let cleared = ctx
            .params
            .pointer("/health_data/cleared")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if pet.health_status == HealthStatus::Recovering && !cleared {
            return CheckOutcome::fail(
                "clearance_missing",
                "recovering pet needs veterinary clearance in health_data",
            );
        }
        CheckOutcome::pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::mock_deps;
    use serde_json::json;

    async fn run(pet: &Pet, params: serde_json::Value) -> CheckOutcome {
        let deps = mock_deps();
        PetHealthyCriterion
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
    async fn recovering_pet_needs_clearance() {
        let mut pet = Pet::new("Biscuit", "dog", 100.0);
        pet.health_status = HealthStatus::Recovering;

        match run(&pet, serde_json::Value::Null).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "clearance_missing"),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(
            run(&pet, json!({ "health_data": { "cleared": true } }))
                .await
                .passed()
        );
    }

    #[tokio::test]
    async fn under_treatment_never_returns() {
        let mut pet = Pet::new("Biscuit", "dog", 100.0);
        pet.health_status = HealthStatus::UnderTreatment;
        match run(&pet, json!({ "health_data": { "cleared": true } })).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "still_under_treatment"),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
