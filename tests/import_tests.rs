//! Importación de planillas: parseo de filas reales y política tolerante
//! del contador (sobrescribir solo si es mayor).

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use fleet_management::services::mileage::{self, OdometerStore};
use fleet_management::services::trip_import::parse_trips_csv;
use fleet_management::utils::errors::{AppError, AppResult};

struct MemoryOdometerStore {
    readings: HashMap<Uuid, Decimal>,
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

const HEADER: &str = "Fecha,Hora,Motorista,Matrícula,Origen,Destino,Distancia,KM Final\n";

#[test]
fn parses_mixed_good_and_bad_rows_without_aborting() {
    let csv = format!(
        "{}\
2026-03-10,08:30,123.456.789-01,ABC-1234,Base,Puerto,\"120,5\",\n\
,,,,,,,\n\
2026-03-11,malahora,123.456.789-01,ABC-1234,Puerto,Base,80,\n\
11/03/2026,09:15,María Silva - 345678901,Fiat Uno - abc1234,Puerto,Base,80,45900\n",
        HEADER
    );

    let outcome = parse_trips_csv(&csv).unwrap();

    assert_eq!(outcome.rows.len(), 2);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].line, 4);

    let first = &outcome.rows[0];
    assert_eq!(first.cpf, "12345678901");
    assert_eq!(first.license_plate, "ABC1234");
    assert_eq!(first.distance, "120.5".parse::<Decimal>().unwrap());

    let second = &outcome.rows[1];
    assert_eq!(second.cpf, "00345678901");
    assert_eq!(second.final_odometer, Some(Decimal::from(45900)));
}

#[tokio::test]
async fn imported_rows_apply_overwrite_if_greater_policy() {
    let vehicle = Uuid::new_v4();
    let mut readings = HashMap::new();
    readings.insert(vehicle, Decimal::from(46000));
    let mut store = MemoryOdometerStore { readings };

    // primera fila con lectura menor a la vigente, segunda con una mayor
    let csv = format!(
        "{}\
2026-03-10,08:30,12345678901,ABC1234,Base,Puerto,100,45900\n\
2026-03-11,09:00,12345678901,ABC1234,Puerto,Base,100,46500\n",
        HEADER
    );
    let outcome = parse_trips_csv(&csv).unwrap();
    assert_eq!(outcome.rows.len(), 2);

    let first = mileage::register_imported_trip(
        &mut store,
        vehicle,
        outcome.rows[0].distance,
        outcome.rows[0].final_odometer,
    )
    .await
    .unwrap();
    // la lectura menor no mueve el contador
    assert_eq!(store.readings[&vehicle], Decimal::from(46000));
    assert_eq!(first.applied_delta, Decimal::ZERO);

    mileage::register_imported_trip(
        &mut store,
        vehicle,
        outcome.rows[1].distance,
        outcome.rows[1].final_odometer,
    )
    .await
    .unwrap();
    assert_eq!(store.readings[&vehicle], Decimal::from(46500));
}

#[tokio::test]
async fn imported_row_without_final_odometer_adds_distance() {
    let vehicle = Uuid::new_v4();
    let mut readings = HashMap::new();
    readings.insert(vehicle, Decimal::from(46000));
    let mut store = MemoryOdometerStore { readings };

    let csv = format!("{}2026-03-10,08:30,12345678901,ABC1234,Base,Puerto,150,\n", HEADER);
    let outcome = parse_trips_csv(&csv).unwrap();

    mileage::register_imported_trip(
        &mut store,
        vehicle,
        outcome.rows[0].distance,
        outcome.rows[0].final_odometer,
    )
    .await
    .unwrap();

    assert_eq!(store.readings[&vehicle], Decimal::from(46150));
}
