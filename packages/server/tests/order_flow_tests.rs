//! Store order flow: placement, approval, processing, delivery, and the
//! pet/order coupling at both ends.

mod common;

use common::{harness, harness_with, seeded_pet};
use orchestrator_core::domains::orders::models::{Order, OrderStatus};
use orchestrator_core::domains::pets::models::Pet;
use orchestrator_core::kernel::test_dependencies::{
    MockEmailService, MockPaymentGateway, MockPetstoreApi, MockWeatherApi,
};
use turnstile::{EntityService, EntityServiceExt, LifecycleEntity, ProcessError, ServiceError};

#[tokio::test]
async fn placing_an_order_holds_the_pet_and_computes_the_total() {
    let h = harness();
    let service = h.service();
    let (pet_id, pet) = seeded_pet(&service, "Biscuit", "dog", 180.0).await;

    let order = Order::new(&pet, "buyer@example.org", 2);
    service.save_entity(&order).await.unwrap();
    let receipt = service
        .transition(Order::KIND, order.id, "place")
        .await
        .unwrap();

    assert_eq!(receipt.meta.state, "placed");
    assert_eq!(receipt.secondary.len(), 1);
    assert!(receipt.secondary[0].succeeded());

    let (_, stored): (_, Order) = service.get_entity(order.id).await.unwrap().unwrap();
    assert_eq!(stored.total_amount, Some(360.0));
    assert_eq!(stored.status, OrderStatus::Placed);

    let pet_doc = service.get_by_id(Pet::KIND, pet_id).await.unwrap().unwrap();
    assert_eq!(pet_doc.meta.state, "pending");
}

#[tokio::test]
async fn order_for_an_unlisted_pet_aborts_and_stays_initial() {
    let h = harness();
    let service = h.service();

    // Saved but never activated: the pet is not in the available state.
    let pet = Pet::new("Biscuit", "dog", 180.0);
    service.save_entity(&pet).await.unwrap();

    let order = Order::new(&pet, "buyer@example.org", 1);
    service.save_entity(&order).await.unwrap();
    let err = service
        .transition(Order::KIND, order.id, "place")
        .await
        .unwrap_err();

    match err {
        ServiceError::ProcessorFailed { source, .. } => {
            assert!(matches!(*source, ProcessError::RelatedState { .. }));
        }
        other => panic!("expected ProcessorFailed, got {other:?}"),
    }

    // The order was never persisted in a new state.
    let doc = service
        .get_by_id(Order::KIND, order.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(doc.meta.state, "initial_state");
    let stored: Order = doc.decode().unwrap();
    assert_eq!(stored.total_amount, None);
}

#[tokio::test]
async fn zero_quantity_order_is_rejected_by_the_guard() {
    let h = harness();
    let service = h.service();
    let (_, pet) = seeded_pet(&service, "Biscuit", "dog", 180.0).await;

    let order = Order::new(&pet, "buyer@example.org", 0);
    service.save_entity(&order).await.unwrap();
    let err = service
        .transition(Order::KIND, order.id, "place")
        .await
        .unwrap_err();

    match err {
        ServiceError::Rejected {
            criterion, code, ..
        } => {
            assert_eq!(criterion, "ValidOrderCriterion");
            assert_eq!(code, "quantity_out_of_range");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn declined_payment_aborts_approval() {
    let h = harness_with(
        MockEmailService::new(),
        MockPaymentGateway::new().declining("card expired"),
        MockPetstoreApi::new(),
        MockWeatherApi::new(),
    );
    let service = h.service();
    let (_, pet) = seeded_pet(&service, "Biscuit", "dog", 180.0).await;

    let order = Order::new(&pet, "buyer@example.org", 1);
    service.save_entity(&order).await.unwrap();
    service
        .transition(Order::KIND, order.id, "place")
        .await
        .unwrap();

    let err = service
        .transition(Order::KIND, order.id, "approve")
        .await
        .unwrap_err();
    match err {
        ServiceError::ProcessorFailed { source, .. } => {
            assert!(matches!(*source, ProcessError::PaymentDeclined(_)));
        }
        other => panic!("expected ProcessorFailed, got {other:?}"),
    }

    // Still placed; approval left no trace.
    let (meta, stored): (_, Order) = service.get_entity(order.id).await.unwrap().unwrap();
    assert_eq!(meta.state, "placed");
    assert!(stored.payment_transaction_id.is_none());
    assert_eq!(h.payment.authorize_calls().len(), 1);
}

#[tokio::test]
async fn full_flow_delivers_the_order_and_sells_the_pet() {
    let h = harness();
    let service = h.service();
    let (pet_id, pet) = seeded_pet(&service, "Biscuit", "dog", 180.0).await;

    let order = Order::new(&pet, "buyer@example.org", 1);
    service.save_entity(&order).await.unwrap();
    for transition in ["place", "approve", "begin_processing", "complete_delivery"] {
        service
            .transition(Order::KIND, order.id, transition)
            .await
            .unwrap();
    }

    let (meta, stored): (_, Order) = service.get_entity(order.id).await.unwrap().unwrap();
    assert_eq!(meta.state, "delivered");
    assert!(stored.complete);
    assert!(stored.delivered_at.is_some());
    assert!(stored
        .tracking_number
        .as_deref()
        .is_some_and(|t| t.starts_with("TRK-")));

    // Cross-entity sync: the pet completed its sale.
    let pet_doc = service.get_by_id(Pet::KIND, pet_id).await.unwrap().unwrap();
    assert_eq!(pet_doc.meta.state, "sold");
}

#[tokio::test]
async fn failed_pet_sync_is_best_effort_and_never_rolls_back_delivery() {
    let h = harness();
    let service = h.service();
    let (pet_id, pet) = seeded_pet(&service, "Biscuit", "dog", 180.0).await;

    let order = Order::new(&pet, "buyer@example.org", 1);
    service.save_entity(&order).await.unwrap();
    for transition in ["place", "approve", "begin_processing"] {
        service
            .transition(Order::KIND, order.id, transition)
            .await
            .unwrap();
    }

    // Sell the pet out from under the order: its complete_sale transition
    // will no longer be permitted when delivery tries to sync it.
    service
        .transition(Pet::KIND, pet_id, "complete_sale")
        .await
        .unwrap();

    let receipt = service
        .transition(Order::KIND, order.id, "complete_delivery")
        .await
        .unwrap();

    // Primary committed despite the failed secondary.
    assert_eq!(receipt.meta.state, "delivered");
    assert_eq!(receipt.secondary.len(), 1);
    assert!(!receipt.secondary[0].succeeded());

    let (_, stored): (_, Order) = service.get_entity(order.id).await.unwrap().unwrap();
    assert!(stored.complete);
    assert!(stored.delivered_at.is_some());
}
