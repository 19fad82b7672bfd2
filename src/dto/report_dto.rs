use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::services::license_status::LicenseStatus;
use crate::services::maintenance_advisor::MaintenanceStatus;

// Los renderizadores externos (PDF/Excel) consumen estas filas planas;
// el backend no produce bytes de reporte.

// Fila de multas agrupadas por motorista
#[derive(Debug, Serialize)]
pub struct FinesByDriverRow {
    pub driver_name: String,
    pub total: i64,
    pub total_amount: f64,
}

// Fila de multas agrupadas por vehículo
#[derive(Debug, Serialize)]
pub struct FinesByVehicleRow {
    pub license_plate: String,
    pub total: i64,
    pub total_amount: f64,
}

// Fila de viajes agrupados por motorista
#[derive(Debug, Serialize)]
pub struct TripsByDriverRow {
    pub driver_name: String,
    pub total: i64,
    pub total_distance: f64,
}

// Fila de mantenimientos agrupados por vehículo
#[derive(Debug, Serialize)]
pub struct MaintenanceByVehicleRow {
    pub license_plate: String,
    pub total: i64,
    pub total_cost: f64,
}

// Alerta de mantenimiento para el dashboard
#[derive(Debug, Serialize)]
pub struct MaintenanceAlertResponse {
    pub vehicle_id: Uuid,
    pub license_plate: String,
    pub vehicle_model: String,
    pub current_odometer: f64,
    pub next_service_odometer: f64,
    #[serde(flatten)]
    pub status: MaintenanceStatus,
    pub message: String,
}

// Alerta de CNH para el dashboard
#[derive(Debug, Serialize)]
pub struct LicenseAlertResponse {
    pub driver_id: Uuid,
    pub full_name: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    #[serde(flatten)]
    pub status: LicenseStatus,
    pub message: String,
}

// Resumen general del dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_drivers: i64,
    pub total_vehicles: i64,
    pub total_trips: i64,
    pub total_fines: i64,
    pub total_fine_amount: f64,
    pub maintenance_alerts: Vec<MaintenanceAlertResponse>,
    pub license_alerts: Vec<LicenseAlertResponse>,
}
