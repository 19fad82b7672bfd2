use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Request para registrar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    pub license_plate: String,

    #[validate(length(min = 2, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(length(min = 2, max = 20))]
    pub registration_number: String,

    pub current_odometer: Option<f64>,
}

// Request para actualizar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    pub license_plate: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(min = 2, max = 20))]
    pub registration_number: Option<String>,

    // edición directa del contador, permitida desde el formulario de vehículo
    pub current_odometer: Option<f64>,
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub license_plate: String,
    pub model: String,
    pub year: i32,
    pub registration_number: String,
    pub current_odometer: f64,
    pub created_at: DateTime<Utc>,
}
