//! Modelo de Driver (motorista)
//!
//! Este módulo contiene el struct Driver que mapea a la tabla drivers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Driver principal - mapea a la tabla drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub full_name: String,
    /// CPF normalizado a 11 dígitos, único
    pub cpf: String,
    /// Número de CNH, único
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub created_at: DateTime<Utc>,
}
