use async_trait::async_trait;
use turnstile::{CheckContext, CheckOutcome, Criterion};

use crate::domains::pets::models::{AdoptionStatus, HealthStatus, Pet};
use crate::kernel::ServerDeps;

/// Gates reservation and order holds: the pet must still be adoptable.
pub struct PetAvailableCriterion;

#[async_trait]
impl Criterion<Pet, ServerDeps> for PetAvailableCriterion {
    fn name(&self) -> &'static str {
        "PetAvailableCriterion"
    }

    async fn check(&self, pet: &Pet, _ctx: &CheckContext<'_, ServerDeps>) -> CheckOutcome {
        if pet.adoption_status != AdoptionStatus::Available {
            return CheckOutcome::fail(
                "not_adoptable",
                format!("adoption status is {:?}", pet.adoption_status),
            );
        }
        if pet.health_status != HealthStatus::Healthy {
            return CheckOutcome::fail(
                "pet_not_healthy",
                format!("health status is {:?}", pet.health_status),
            );
        }
        CheckOutcome::pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::mock_deps;

    async fn run(pet: &Pet) -> CheckOutcome {
        let deps = mock_deps();
        let params = serde_json::Value::Null;
        PetAvailableCriterion
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
    async fn reserved_pet_is_not_adoptable() {
        let mut pet = Pet::new("Biscuit", "dog", 100.0);
        pet.adoption_status = AdoptionStatus::Reserved;
        match run(&pet).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "not_adoptable"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sick_pet_is_not_adoptable() {
        let mut pet = Pet::new("Biscuit", "dog", 100.0);
        pet.health_status = HealthStatus::UnderTreatment;
        match run(&pet).await {
            CheckOutcome::Fail { code, .. } => assert_eq!(code, "pet_not_healthy"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn healthy_available_pet_passes() {
        let pet = Pet::new("Biscuit", "dog", 100.0);
        assert!(run(&pet).await.passed());
    }
}
