//! Modelo de Fine (multa)
//!
//! Las multas referencian motorista, vehículo y opcionalmente un viaje.
//! No participan de la conciliación de kilometraje, pero bloquean el
//! borrado de los registros que referencian.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipos de infracción permitidos
pub const VIOLATION_TYPES: [&str; 7] = [
    "Exceso de Velocidad",
    "Estacionamiento Irregular",
    "Avance de Semáforo",
    "Uso de Celular",
    "Falta de Cinturón",
    "Documentación Irregular",
    "Otros",
];

/// Fine principal - mapea a la tabla fines
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Fine {
    pub id: Uuid,
    pub fine_date: NaiveDate,
    pub fine_time: Option<NaiveTime>,
    pub location: String,
    pub violation_type: String,
    pub description: Option<String>,
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,
    pub amount: Decimal,
    pub trip_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Fila de multa con datos de motorista y vehículo para listados
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FineWithRefs {
    pub id: Uuid,
    pub fine_date: NaiveDate,
    pub fine_time: Option<NaiveTime>,
    pub location: String,
    pub violation_type: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub driver_id: Uuid,
    pub driver_name: String,
    pub vehicle_id: Uuid,
    pub license_plate: String,
    pub vehicle_model: String,
    pub trip_id: Option<Uuid>,
}
