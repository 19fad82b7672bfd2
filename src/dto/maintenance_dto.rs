use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Request para registrar un mantenimiento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceRequest {
    pub vehicle_id: Uuid,
    pub service_date: NaiveDate,

    #[validate(length(min = 2, max = 50))]
    pub service_type: String,

    pub description: Option<String>,
    pub odometer_at_service: f64,
    pub next_service_odometer: Option<f64>,
    pub next_service_date: Option<NaiveDate>,
    pub cost: f64,
}

// Request para actualizar un mantenimiento (sin conciliación de contador)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMaintenanceRequest {
    pub service_date: Option<NaiveDate>,

    #[validate(length(min = 2, max = 50))]
    pub service_type: Option<String>,

    pub description: Option<String>,
    pub next_service_odometer: Option<f64>,
    pub next_service_date: Option<NaiveDate>,
    pub cost: Option<f64>,
}

// Response de mantenimiento
#[derive(Debug, Serialize)]
pub struct MaintenanceResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub service_date: NaiveDate,
    pub service_type: String,
    pub description: Option<String>,
    pub odometer_at_service: f64,
    pub next_service_odometer: Option<f64>,
    pub next_service_date: Option<NaiveDate>,
    pub cost: f64,
    pub created_at: DateTime<Utc>,
}

// Response de mantenimiento para listados, con vehículo resuelto
#[derive(Debug, Serialize)]
pub struct MaintenanceListResponse {
    pub id: Uuid,
    pub service_date: NaiveDate,
    pub service_type: String,
    pub description: Option<String>,
    pub odometer_at_service: f64,
    pub next_service_odometer: Option<f64>,
    pub next_service_date: Option<NaiveDate>,
    pub cost: f64,
    pub vehicle_id: Uuid,
    pub license_plate: String,
    pub vehicle_model: String,
}
