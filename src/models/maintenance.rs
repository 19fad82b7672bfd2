//! Modelo de MaintenanceRecord (mantenimiento)
//!
//! Registros de servicio por vehículo. En la práctica son append-only:
//! la edición no dispara conciliación de kilometraje, la baja es simple.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipos de servicio permitidos
pub const SERVICE_TYPES: [&str; 8] = [
    "Cambio de Aceite",
    "Revisión",
    "Cambio de Neumáticos",
    "Alineación",
    "Balanceo",
    "Frenos",
    "Suspensión",
    "Otros",
];

/// MaintenanceRecord principal - mapea a la tabla maintenance_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub service_date: NaiveDate,
    pub service_type: String,
    pub description: Option<String>,
    /// Lectura del odómetro al realizar el servicio
    pub odometer_at_service: Decimal,
    /// Odómetro al que corresponde el próximo servicio, si se agendó
    pub next_service_odometer: Option<Decimal>,
    pub next_service_date: Option<NaiveDate>,
    pub cost: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Fila de mantenimiento con datos del vehículo para listados
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MaintenanceWithVehicle {
    pub id: Uuid,
    pub service_date: NaiveDate,
    pub service_type: String,
    pub description: Option<String>,
    pub odometer_at_service: Decimal,
    pub next_service_odometer: Option<Decimal>,
    pub next_service_date: Option<NaiveDate>,
    pub cost: Decimal,
    pub vehicle_id: Uuid,
    pub license_plate: String,
    pub vehicle_model: String,
}
