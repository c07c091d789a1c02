//! Warehouse fulfillment flow: the second order schema end to end.

mod common;

use common::harness;
use orchestrator_core::domains::fulfillment::models::{FulfillmentLine, FulfillmentOrder};
use turnstile::{EntityService, EntityServiceExt, LifecycleEntity, ServiceError};

fn line(sku: &str, quantity: u32) -> FulfillmentLine {
    FulfillmentLine {
        sku: sku.to_string(),
        description: format!("{} item", sku),
        quantity,
    }
}

#[tokio::test]
async fn fulfillment_runs_from_picking_to_delivery() {
    let h = harness();
    let service = h.service();

    let order = FulfillmentOrder::new("FF-2024-0042", vec![line("KIBBLE-5KG", 4)]);
    service.save_entity(&order).await.unwrap();

    for transition in ["start_picking", "finish_picking", "dispatch", "confirm_delivery"] {
        service
            .transition(FulfillmentOrder::KIND, order.id, transition)
            .await
            .unwrap();
    }

    let (meta, stored): (_, FulfillmentOrder) =
        service.get_entity(order.id).await.unwrap().unwrap();
    assert_eq!(meta.state, "DELIVERED");
    assert!(stored.picking_started_at.is_some());
    assert!(stored.picked_at.is_some());
    assert!(stored.sent_at.is_some());
    assert!(stored.delivered_at.is_some());
    assert!(stored.delivered_at.unwrap() >= stored.sent_at.unwrap());
    assert_eq!(stored.courier.as_deref(), Some("Maple Express"));
    assert!(stored
        .tracking_code
        .as_deref()
        .is_some_and(|t| t.starts_with("SHIP-")));
}

#[tokio::test]
async fn empty_order_cannot_start_picking() {
    let h = harness();
    let service = h.service();

    let order = FulfillmentOrder::new("FF-2024-0042", vec![]);
    service.save_entity(&order).await.unwrap();

    let err = service
        .transition(FulfillmentOrder::KIND, order.id, "start_picking")
        .await
        .unwrap_err();
    match err {
        ServiceError::Rejected {
            criterion, code, ..
        } => {
            assert_eq!(criterion, "FulfillmentLinesCriterion");
            assert_eq!(code, "no_lines");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn courier_can_be_chosen_via_transition_params() {
    let h = harness();
    let service = h.service();

    let order = FulfillmentOrder::new("FF-2024-0042", vec![line("KIBBLE-5KG", 4)]);
    service.save_entity(&order).await.unwrap();
    service
        .transition(FulfillmentOrder::KIND, order.id, "start_picking")
        .await
        .unwrap();
    service
        .transition(FulfillmentOrder::KIND, order.id, "finish_picking")
        .await
        .unwrap();
    service
        .execute_transition(
            FulfillmentOrder::KIND,
            order.id,
            "dispatch",
            serde_json::json!({ "shipment_data": { "courier": "Polar Post" } }),
        )
        .await
        .unwrap();

    let (_, stored): (_, FulfillmentOrder) =
        service.get_entity(order.id).await.unwrap().unwrap();
    assert_eq!(stored.courier.as_deref(), Some("Polar Post"));
}

#[tokio::test]
async fn delivery_confirmation_requires_a_dispatched_shipment() {
    let h = harness();
    let service = h.service();

    let order = FulfillmentOrder::new("FF-2024-0042", vec![line("KIBBLE-5KG", 4)]);
    service.save_entity(&order).await.unwrap();

    // Straight to confirmation: the state machine itself refuses.
    let err = service
        .transition(FulfillmentOrder::KIND, order.id, "confirm_delivery")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotPermitted { .. }));
}
