use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::services::license_status::LicenseStatus;

// Request para registrar un motorista
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 2, max = 200))]
    pub full_name: String,

    pub cpf: String,

    #[validate(length(min = 2, max = 20))]
    pub license_number: String,

    pub license_expiry: NaiveDate,
}

// Request para actualizar un motorista
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 2, max = 200))]
    pub full_name: Option<String>,

    pub cpf: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub license_number: Option<String>,

    pub license_expiry: Option<NaiveDate>,
}

// Response de motorista
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: Uuid,
    pub full_name: String,
    pub cpf: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub license_status: LicenseStatus,
    pub created_at: DateTime<Utc>,
}
