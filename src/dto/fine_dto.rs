use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Request para registrar una multa
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFineRequest {
    pub fine_date: NaiveDate,
    pub fine_time: Option<NaiveTime>,

    #[validate(length(min = 1, max = 200))]
    pub location: String,

    #[validate(length(min = 2, max = 100))]
    pub violation_type: String,

    pub description: Option<String>,
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,
    pub amount: f64,
    pub trip_id: Option<Uuid>,
}

// Request para actualizar una multa
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFineRequest {
    pub fine_date: Option<NaiveDate>,
    pub fine_time: Option<NaiveTime>,

    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub violation_type: Option<String>,

    pub description: Option<String>,
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub amount: Option<f64>,
}

// Response de multa
#[derive(Debug, Serialize)]
pub struct FineResponse {
    pub id: Uuid,
    pub fine_date: NaiveDate,
    pub fine_time: Option<NaiveTime>,
    pub location: String,
    pub violation_type: String,
    pub description: Option<String>,
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,
    pub amount: f64,
    pub trip_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// Response de multa para listados, con motorista y vehículo resueltos
#[derive(Debug, Serialize)]
pub struct FineListResponse {
    pub id: Uuid,
    pub fine_date: NaiveDate,
    pub fine_time: Option<NaiveTime>,
    pub location: String,
    pub violation_type: String,
    pub description: Option<String>,
    pub amount: f64,
    pub driver_id: Uuid,
    pub driver_name: String,
    pub vehicle_id: Uuid,
    pub license_plate: String,
    pub vehicle_model: String,
    pub trip_id: Option<Uuid>,
}
