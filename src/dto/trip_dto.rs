use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Request para registrar un viaje
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTripRequest {
    pub trip_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,

    #[validate(length(max = 200))]
    pub origin: String,

    #[validate(length(min = 1, max = 200))]
    pub destination: String,

    pub distance: Option<f64>,
    pub final_odometer: Option<f64>,
}

// Request para actualizar un viaje (reemplazo completo de los campos)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTripRequest {
    pub trip_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,

    #[validate(length(max = 200))]
    pub origin: String,

    #[validate(length(min = 1, max = 200))]
    pub destination: String,

    pub distance: Option<f64>,
    pub final_odometer: Option<f64>,
}

// Response de viaje
#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: Uuid,
    pub trip_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub distance: f64,
    pub final_odometer: Option<f64>,
    pub created_at: DateTime<Utc>,
}

// Response de viaje para listados, con motorista y vehículo resueltos
#[derive(Debug, Serialize)]
pub struct TripListResponse {
    pub id: Uuid,
    pub trip_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub origin: String,
    pub destination: String,
    pub distance: f64,
    pub final_odometer: Option<f64>,
    pub driver_id: Uuid,
    pub driver_name: String,
    pub vehicle_id: Uuid,
    pub license_plate: String,
    pub vehicle_model: String,
}

// Resumen de una importación de planilla
#[derive(Debug, Serialize)]
pub struct ImportSummaryResponse {
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}
