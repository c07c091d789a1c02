//! Weather flow: station activation with GeoMet ingestion (and its fallback),
//! plus observation validation.

mod common;

use chrono::NaiveDate;
use common::{harness, harness_with};
use orchestrator_core::domains::weather::models::{WeatherData, WeatherStation};
use orchestrator_core::kernel::test_dependencies::{
    MockEmailService, MockPaymentGateway, MockPetstoreApi, MockWeatherApi,
};
use orchestrator_core::kernel::ClimateDaily;
use turnstile::{EntityService, EntityServiceExt, LifecycleEntity, ServiceError};

fn ottawa_station() -> WeatherStation {
    WeatherStation::new("6105976", "OTTAWA CDA", "ON", 45.0, -75.0, 1990, 2024)
}

fn daily(date: (i32, u32, u32), min: f64, mean: f64, max: f64) -> ClimateDaily {
    ClimateDaily {
        climate_identifier: "6105976".to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        temperature_min: Some(min),
        temperature_mean: Some(mean),
        temperature_max: Some(max),
        total_precipitation: Some(0.4),
    }
}

#[tokio::test]
async fn activation_ingests_and_validates_recent_observations() {
    let h = harness_with(
        MockEmailService::new(),
        MockPaymentGateway::new(),
        MockPetstoreApi::new(),
        MockWeatherApi::new()
            .with_daily(daily((2024, 1, 14), -12.0, -6.0, -1.0))
            .with_daily(daily((2024, 1, 15), -9.0, -3.5, 2.0)),
    );
    let service = h.service();

    let station = ottawa_station();
    service.save_entity(&station).await.unwrap();
    let receipt = service
        .transition(WeatherStation::KIND, station.id, "activate")
        .await
        .unwrap();

    assert_eq!(receipt.meta.state, "active");
    // One validate request per ingested observation, all successful.
    assert_eq!(receipt.secondary.len(), 2);
    assert!(receipt.secondary.iter().all(|a| a.succeeded()));

    let records = service.find_all(WeatherData::KIND).await.unwrap();
    assert_eq!(records.len(), 2);
    for doc in records {
        assert_eq!(doc.meta.state, "validated");
        let record: WeatherData = doc.decode().unwrap();
        assert!(record.temperature_range.is_some());
        assert!(record.validated_at.is_some());
    }
}

#[tokio::test]
async fn unreachable_geomet_falls_back_to_a_mock_sample() {
    let h = harness_with(
        MockEmailService::new(),
        MockPaymentGateway::new(),
        MockPetstoreApi::new(),
        MockWeatherApi::new().unreachable(),
    );
    let service = h.service();

    let station = ottawa_station();
    service.save_entity(&station).await.unwrap();
    let receipt = service
        .transition(WeatherStation::KIND, station.id, "activate")
        .await
        .unwrap();

    // Activation still commits, seeded with the fallback observation.
    assert_eq!(receipt.meta.state, "active");
    let records = service.find_all(WeatherData::KIND).await.unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn station_outside_canada_never_activates() {
    let h = harness();
    let service = h.service();

    let mut station = ottawa_station();
    station.latitude = 35.0;
    service.save_entity(&station).await.unwrap();

    let err = service
        .transition(WeatherStation::KIND, station.id, "activate")
        .await
        .unwrap_err();
    match err {
        ServiceError::Rejected {
            criterion, code, ..
        } => {
            assert_eq!(criterion, "ValidStationCriterion");
            assert_eq!(code, "outside_canada");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert!(service.find_all(WeatherData::KIND).await.unwrap().is_empty());
}

#[tokio::test]
async fn inconsistent_observation_fails_validation() {
    let h = harness();
    let service = h.service();

    let mut record = WeatherData::new("6105976", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    record.temperature_min = Some(5.0);
    record.temperature_mean = Some(1.0);
    record.temperature_max = Some(8.0);
    service.save_entity(&record).await.unwrap();

    let err = service
        .transition(WeatherData::KIND, record.id, "validate")
        .await
        .unwrap_err();
    match err {
        ServiceError::Rejected { code, .. } => assert_eq!(code, "temperatures_inconsistent"),
        other => panic!("expected Rejected, got {other:?}"),
    }

    let doc = service
        .get_by_id(WeatherData::KIND, record.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(doc.meta.state, "initial_state");
}

#[tokio::test]
async fn validated_observation_can_be_archived() {
    let h = harness();
    let service = h.service();

    let mut record = WeatherData::new("6105976", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    record.temperature_min = Some(-3.0);
    record.temperature_max = Some(4.0);
    service.save_entity(&record).await.unwrap();
    service
        .transition(WeatherData::KIND, record.id, "validate")
        .await
        .unwrap();
    let receipt = service
        .transition(WeatherData::KIND, record.id, "archive")
        .await
        .unwrap();
    assert_eq!(receipt.meta.state, "archived");

    let (_, stored): (_, WeatherData) = service.get_entity(record.id).await.unwrap().unwrap();
    assert_eq!(stored.temperature_range, Some(7.0));
}
