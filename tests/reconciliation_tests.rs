//! Propiedades de la conciliación de kilometraje sobre un store en memoria.
//!
//! La interfaz `OdometerStore` permite ejercitar las reglas completas de
//! alta/edición/baja de viajes sin base de datos.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use fleet_management::services::maintenance_advisor::{self, MaintenanceStatus};
use fleet_management::services::mileage::{self, OdometerStore};
use fleet_management::utils::errors::{AppError, AppResult};

struct MemoryOdometerStore {
    readings: HashMap<Uuid, Decimal>,
}

impl MemoryOdometerStore {
    fn with_vehicle(vehicle_id: Uuid, reading: Decimal) -> Self {
        let mut readings = HashMap::new();
        readings.insert(vehicle_id, reading);
        Self { readings }
    }

    fn reading(&self, vehicle_id: Uuid) -> Decimal {
        self.readings[&vehicle_id]
    }
}

#[async_trait]
impl OdometerStore for MemoryOdometerStore {
    async fn current_reading(&mut self, vehicle_id: Uuid) -> AppResult<Decimal> {
        self.readings
            .get(&vehicle_id)
            .copied()
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))
    }

    async fn write_reading(&mut self, vehicle_id: Uuid, reading: Decimal) -> AppResult<()> {
        self.readings.insert(vehicle_id, reading);
        Ok(())
    }
}

fn km(value: i64) -> Decimal {
    Decimal::from(value)
}

#[tokio::test]
async fn trip_with_distance_only_increases_ledger_by_exactly_d() {
    let vehicle = Uuid::new_v4();
    let mut store = MemoryOdometerStore::with_vehicle(vehicle, km(12000));

    let effect = mileage::register_trip(&mut store, vehicle, km(350), None)
        .await
        .unwrap();

    assert_eq!(store.reading(vehicle), km(12350));
    assert_eq!(effect.applied_delta, km(350));
}

#[tokio::test]
async fn trip_with_absolute_reading_sets_ledger_to_exactly_k() {
    let vehicle = Uuid::new_v4();
    let mut store = MemoryOdometerStore::with_vehicle(vehicle, km(12000));

    let effect = mileage::register_trip(&mut store, vehicle, Decimal::ZERO, Some(km(13000)))
        .await
        .unwrap();

    assert_eq!(store.reading(vehicle), km(13000));
    assert_eq!(effect.applied_delta, km(1000));
}

#[tokio::test]
async fn trip_with_absolute_reading_below_current_is_rejected() {
    let vehicle = Uuid::new_v4();
    let mut store = MemoryOdometerStore::with_vehicle(vehicle, km(12000));

    let result = mileage::register_trip(&mut store, vehicle, Decimal::ZERO, Some(km(11000))).await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
    // rechazado sin tocar el contador
    assert_eq!(store.reading(vehicle), km(12000));
}

#[tokio::test]
async fn create_then_delete_round_trips_the_ledger() {
    let vehicle = Uuid::new_v4();
    let mut store = MemoryOdometerStore::with_vehicle(vehicle, km(12000));

    let effect = mileage::register_trip(&mut store, vehicle, km(480), None)
        .await
        .unwrap();
    assert_eq!(store.reading(vehicle), km(12480));

    mileage::revert_trip(&mut store, vehicle, effect.applied_delta)
        .await
        .unwrap();
    assert_eq!(store.reading(vehicle), km(12000));
}

#[tokio::test]
async fn create_with_absolute_then_delete_round_trips_the_ledger() {
    let vehicle = Uuid::new_v4();
    let mut store = MemoryOdometerStore::with_vehicle(vehicle, km(12000));

    let effect = mileage::register_trip(&mut store, vehicle, Decimal::ZERO, Some(km(12700)))
        .await
        .unwrap();

    mileage::revert_trip(&mut store, vehicle, effect.applied_delta)
        .await
        .unwrap();
    assert_eq!(store.reading(vehicle), km(12000));
}

#[tokio::test]
async fn edit_is_differential_not_absolute_overwrite() {
    let vehicle = Uuid::new_v4();
    let mut store = MemoryOdometerStore::with_vehicle(vehicle, km(10000));

    // alta con 300 km, luego edición a 100 km
    let created = mileage::register_trip(&mut store, vehicle, km(300), None)
        .await
        .unwrap();
    let edited = mileage::rebase_trip(&mut store, vehicle, created.applied_delta, km(100), None)
        .await
        .unwrap();

    assert_eq!(store.reading(vehicle), km(10100));
    assert_eq!(edited.applied_delta, km(100));
}

#[tokio::test]
async fn repeated_edits_are_idempotent_on_the_ledger() {
    let vehicle = Uuid::new_v4();
    let mut store = MemoryOdometerStore::with_vehicle(vehicle, km(10000));

    let mut delta = mileage::register_trip(&mut store, vehicle, km(300), None)
        .await
        .unwrap()
        .applied_delta;

    // editar varias veces con los mismos datos no acumula kilometraje
    for _ in 0..3 {
        delta = mileage::rebase_trip(&mut store, vehicle, delta, km(300), None)
            .await
            .unwrap()
            .applied_delta;
    }

    assert_eq!(store.reading(vehicle), km(10300));

    mileage::revert_trip(&mut store, vehicle, delta).await.unwrap();
    assert_eq!(store.reading(vehicle), km(10000));
}

#[tokio::test]
async fn edit_delete_in_any_order_restores_the_base_reading() {
    let vehicle = Uuid::new_v4();
    let mut store = MemoryOdometerStore::with_vehicle(vehicle, km(5000));

    let first = mileage::register_trip(&mut store, vehicle, km(200), None)
        .await
        .unwrap();
    let second = mileage::register_trip(&mut store, vehicle, km(150), None)
        .await
        .unwrap();
    assert_eq!(store.reading(vehicle), km(5350));

    // se borra el primero antes que el segundo
    mileage::revert_trip(&mut store, vehicle, first.applied_delta)
        .await
        .unwrap();
    mileage::revert_trip(&mut store, vehicle, second.applied_delta)
        .await
        .unwrap();

    assert_eq!(store.reading(vehicle), km(5000));
}

#[tokio::test]
async fn imported_trip_with_lower_final_odometer_leaves_ledger_unchanged() {
    let vehicle = Uuid::new_v4();
    let mut store = MemoryOdometerStore::with_vehicle(vehicle, km(50000));

    let effect =
        mileage::register_imported_trip(&mut store, vehicle, Decimal::ZERO, Some(km(45000)))
            .await
            .unwrap();

    assert_eq!(store.reading(vehicle), km(50000));
    assert_eq!(effect.applied_delta, Decimal::ZERO);
}

#[tokio::test]
async fn imported_trip_with_greater_final_odometer_overwrites() {
    let vehicle = Uuid::new_v4();
    let mut store = MemoryOdometerStore::with_vehicle(vehicle, km(50000));

    mileage::register_imported_trip(&mut store, vehicle, Decimal::ZERO, Some(km(52000)))
        .await
        .unwrap();

    assert_eq!(store.reading(vehicle), km(52000));
}

#[tokio::test]
async fn unknown_vehicle_is_not_found() {
    let mut store = MemoryOdometerStore::with_vehicle(Uuid::new_v4(), km(100));

    let result = mileage::register_trip(&mut store, Uuid::new_v4(), km(10), None).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

// Casos del asesor de mantenimiento sobre la lectura recién conciliada

#[test]
fn advisor_due_soon_at_9500_of_10000() {
    let status = maintenance_advisor::evaluate(km(9500), Some(km(10000)));
    assert_eq!(
        status,
        MaintenanceStatus::DueSoon {
            remaining: km(500)
        }
    );
}

#[test]
fn advisor_overdue_at_10500_of_10000() {
    let status = maintenance_advisor::evaluate(km(10500), Some(km(10000)));
    assert_eq!(status, MaintenanceStatus::Overdue { overage: km(500) });
}

#[test]
fn advisor_ok_at_5000_of_10000_with_no_message() {
    assert_eq!(
        maintenance_advisor::evaluate(km(5000), Some(km(10000))),
        MaintenanceStatus::Ok
    );
    assert!(maintenance_advisor::alert_message(km(5000), Some(km(10000))).is_none());
}

#[tokio::test]
async fn trip_followed_by_advisor_check_reports_due_soon() {
    let vehicle = Uuid::new_v4();
    let mut store = MemoryOdometerStore::with_vehicle(vehicle, km(9000));

    let effect = mileage::register_trip(&mut store, vehicle, km(500), None)
        .await
        .unwrap();

    let message = maintenance_advisor::alert_message(effect.new_reading, Some(km(10000))).unwrap();
    assert!(message.contains("faltan 500 km"));
}
