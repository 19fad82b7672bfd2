//! Modelo de Trip (viaje)
//!
//! Cada viaje registra, además de sus datos propios, el delta exacto que
//! aplicó al odómetro del vehículo (`applied_delta`). Ediciones y bajas
//! revierten ese delta antes de aplicar el nuevo, de modo que la
//! conciliación de kilometraje es diferencial e idempotente.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Trip principal - mapea a la tabla trips
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub trip_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,
    pub origin: String,
    pub destination: String,
    /// Distancia recorrida en km (>= 0, default 0)
    pub distance: Decimal,
    /// Lectura absoluta del odómetro al finalizar, si fue informada
    pub final_odometer: Option<Decimal>,
    /// Delta aplicado al odómetro del vehículo al crear/editar este viaje
    pub applied_delta: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Fila de viaje con datos de motorista y vehículo para listados
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TripWithRefs {
    pub id: Uuid,
    pub trip_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub origin: String,
    pub destination: String,
    pub distance: Decimal,
    pub final_odometer: Option<Decimal>,
    pub driver_id: Uuid,
    pub driver_name: String,
    pub vehicle_id: Uuid,
    pub license_plate: String,
    pub vehicle_model: String,
}
