//! Adoption flow: pet-side reservation creating its own order, plus the
//! health loop gating re-entry to the catalog.

mod common;

use common::{harness, seeded_pet};
use orchestrator_core::domains::orders::models::Order;
use orchestrator_core::domains::pets::models::{AdoptionStatus, HealthStatus, Pet};
use serde_json::json;
use turnstile::{EntityService, EntityServiceExt, LifecycleEntity, ProcessError, ServiceError};

#[tokio::test]
async fn reserving_a_pet_creates_and_confirms_an_adoption_order() {
    let h = harness();
    let service = h.service();
    let (pet_id, _) = seeded_pet(&service, "Clementine", "cat", 120.0).await;

    let receipt = service
        .execute_transition(
            Pet::KIND,
            pet_id,
            "reserve",
            json!({ "order_data": { "buyer_email": "adopter@example.org", "quantity": 1 } }),
        )
        .await
        .unwrap();

    assert_eq!(receipt.meta.state, "pending");
    assert_eq!(receipt.secondary.len(), 1);
    assert!(receipt.secondary[0].succeeded());
    assert_eq!(receipt.secondary[0].transition, "confirm");

    let (_, pet): (_, Pet) = service.get_entity(pet_id).await.unwrap().unwrap();
    assert_eq!(pet.adoption_status, AdoptionStatus::Reserved);
    assert!(pet.reserved_at.is_some());

    // Exactly one adoption order exists, already placed, with the computed total.
    let orders = service.find_all(Order::KIND).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].meta.state, "placed");
    let order: Order = orders[0].decode().unwrap();
    assert_eq!(order.pet_id, pet_id);
    assert_eq!(order.total_amount, Some(120.0));
    assert_eq!(order.buyer_email, "adopter@example.org");
}

#[tokio::test]
async fn reservation_without_buyer_email_aborts_cleanly() {
    let h = harness();
    let service = h.service();
    let (pet_id, _) = seeded_pet(&service, "Clementine", "cat", 120.0).await;

    let err = service
        .transition(Pet::KIND, pet_id, "reserve")
        .await
        .unwrap_err();
    match err {
        ServiceError::ProcessorFailed { source, .. } => {
            assert!(matches!(*source, ProcessError::Precondition(_)));
        }
        other => panic!("expected ProcessorFailed, got {other:?}"),
    }

    // Pet untouched, and the processor failed before creating any order.
    let doc = service.get_by_id(Pet::KIND, pet_id).await.unwrap().unwrap();
    assert_eq!(doc.meta.state, "available");
    let pet: Pet = doc.decode().unwrap();
    assert_eq!(pet.adoption_status, AdoptionStatus::Available);
    assert!(service.find_all(Order::KIND).await.unwrap().is_empty());
}

#[tokio::test]
async fn double_reservation_is_rejected() {
    let h = harness();
    let service = h.service();
    let (pet_id, _) = seeded_pet(&service, "Clementine", "cat", 120.0).await;

    service
        .execute_transition(
            Pet::KIND,
            pet_id,
            "reserve",
            json!({ "order_data": { "buyer_email": "adopter@example.org" } }),
        )
        .await
        .unwrap();

    // Second attempt: wrong state entirely.
    let err = service
        .execute_transition(
            Pet::KIND,
            pet_id,
            "reserve",
            json!({ "order_data": { "buyer_email": "other@example.org" } }),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotPermitted { .. }));
}

#[tokio::test]
async fn health_loop_gates_reentry_to_the_catalog() {
    let h = harness();
    let service = h.service();
    let (pet_id, _) = seeded_pet(&service, "Clementine", "cat", 120.0).await;

    service
        .execute_transition(
            Pet::KIND,
            pet_id,
            "begin_treatment",
            json!({ "health_data": { "notes": "sprained paw" } }),
        )
        .await
        .unwrap();
    let (_, pet): (_, Pet) = service.get_entity(pet_id).await.unwrap().unwrap();
    assert_eq!(pet.health_status, HealthStatus::UnderTreatment);

    service
        .transition(Pet::KIND, pet_id, "mark_recovering")
        .await
        .unwrap();

    // No clearance: the guard blocks the return.
    let err = service
        .transition(Pet::KIND, pet_id, "return_to_availability")
        .await
        .unwrap_err();
    match err {
        ServiceError::Rejected { code, .. } => assert_eq!(code, "clearance_missing"),
        other => panic!("expected Rejected, got {other:?}"),
    }

    // With clearance the pet is healthy and adoptable again.
    service
        .execute_transition(
            Pet::KIND,
            pet_id,
            "return_to_availability",
            json!({ "health_data": { "cleared": true } }),
        )
        .await
        .unwrap();
    let (meta, pet): (_, Pet) = service.get_entity(pet_id).await.unwrap().unwrap();
    assert_eq!(meta.state, "available");
    assert_eq!(pet.health_status, HealthStatus::Healthy);
    assert!(pet.is_adoptable());
}

#[tokio::test]
async fn cancelled_reservation_returns_the_pet_to_the_catalog() {
    let h = harness();
    let service = h.service();
    let (pet_id, _) = seeded_pet(&service, "Clementine", "cat", 120.0).await;

    service
        .execute_transition(
            Pet::KIND,
            pet_id,
            "reserve",
            json!({ "order_data": { "buyer_email": "adopter@example.org" } }),
        )
        .await
        .unwrap();
    service
        .transition(Pet::KIND, pet_id, "cancel_reservation")
        .await
        .unwrap();

    let (meta, pet): (_, Pet) = service.get_entity(pet_id).await.unwrap().unwrap();
    assert_eq!(meta.state, "available");
    assert_eq!(pet.adoption_status, AdoptionStatus::Available);
    assert!(pet.reserved_at.is_none());
}
