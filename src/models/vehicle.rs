//! Modelo de Vehicle (vehículo)
//!
//! Este módulo contiene el struct Vehicle y el contador de kilometraje
//! (`current_odometer`), que funciona como libro mayor del vehículo:
//! lo mutan los viajes, los mantenimientos y las ediciones directas.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    /// Matrícula normalizada, única
    pub license_plate: String,
    pub model: String,
    pub year: i32,
    /// RENAVAM, único
    pub registration_number: String,
    /// Lectura acumulada del odómetro en km
    pub current_odometer: Decimal,
    pub created_at: DateTime<Utc>,
}
