use chrono::Utc;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::dto::report_dto::{
    DashboardResponse, FinesByDriverRow, FinesByVehicleRow, LicenseAlertResponse,
    MaintenanceAlertResponse, MaintenanceByVehicleRow, TripsByDriverRow,
};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::report_repository::ReportRepository;
use crate::services::license_status;
use crate::services::maintenance_advisor;
use crate::utils::errors::AppError;

pub struct ReportController {
    repository: ReportRepository,
    drivers: DriverRepository,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ReportRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool),
        }
    }

    /// Resumen del dashboard: conteos, total de multas y el barrido de
    /// alertas. El status de mantenimiento se deriva fresco por vehículo
    /// en cada consulta, nunca se cachea.
    pub async fn dashboard(&self) -> Result<DashboardResponse, AppError> {
        let total_drivers = self.repository.count_table("drivers").await?;
        let total_vehicles = self.repository.count_table("vehicles").await?;
        let total_trips = self.repository.count_table("trips").await?;
        let total_fines = self.repository.count_table("fines").await?;
        let total_fine_amount = self.repository.total_fine_amount().await?;

        let mut maintenance_alerts = Vec::new();
        for row in self.repository.vehicles_with_next_service().await? {
            let status = maintenance_advisor::evaluate(row.current_odometer, row.next_service_odometer);
            if !status.is_alert() {
                continue;
            }
            let message = maintenance_advisor::alert_message(
                row.current_odometer,
                row.next_service_odometer,
            )
            .unwrap_or_default();
            maintenance_alerts.push(MaintenanceAlertResponse {
                vehicle_id: row.id,
                license_plate: row.license_plate,
                vehicle_model: row.model,
                current_odometer: row.current_odometer.to_f64().unwrap_or(0.0),
                next_service_odometer: row
                    .next_service_odometer
                    .and_then(|v| v.to_f64())
                    .unwrap_or(0.0),
                status,
                message,
            });
        }

        let today = Utc::now().date_naive();
        let mut license_alerts = Vec::new();
        for driver in self.drivers.list().await? {
            let status = license_status::evaluate(driver.license_expiry, today);
            if !status.is_alert() {
                continue;
            }
            let message =
                license_status::alert_message(driver.license_expiry, today).unwrap_or_default();
            license_alerts.push(LicenseAlertResponse {
                driver_id: driver.id,
                full_name: driver.full_name,
                license_number: driver.license_number,
                license_expiry: driver.license_expiry,
                status,
                message,
            });
        }

        Ok(DashboardResponse {
            total_drivers,
            total_vehicles,
            total_trips,
            total_fines,
            total_fine_amount: total_fine_amount.to_f64().unwrap_or(0.0),
            maintenance_alerts,
            license_alerts,
        })
    }

    pub async fn fines_by_driver(&self) -> Result<Vec<FinesByDriverRow>, AppError> {
        let rows = self.repository.fines_by_driver().await?;
        Ok(rows
            .into_iter()
            .map(|row| FinesByDriverRow {
                driver_name: row.driver_name,
                total: row.total,
                total_amount: decimal_to_f64(row.total_amount),
            })
            .collect())
    }

    pub async fn fines_by_vehicle(&self) -> Result<Vec<FinesByVehicleRow>, AppError> {
        let rows = self.repository.fines_by_vehicle().await?;
        Ok(rows
            .into_iter()
            .map(|row| FinesByVehicleRow {
                license_plate: row.license_plate,
                total: row.total,
                total_amount: decimal_to_f64(row.total_amount),
            })
            .collect())
    }

    pub async fn trips_by_driver(&self) -> Result<Vec<TripsByDriverRow>, AppError> {
        let rows = self.repository.trips_by_driver().await?;
        Ok(rows
            .into_iter()
            .map(|row| TripsByDriverRow {
                driver_name: row.driver_name,
                total: row.total,
                total_distance: decimal_to_f64(row.total_distance),
            })
            .collect())
    }

    pub async fn maintenance_by_vehicle(&self) -> Result<Vec<MaintenanceByVehicleRow>, AppError> {
        let rows = self.repository.maintenance_by_vehicle().await?;
        Ok(rows
            .into_iter()
            .map(|row| MaintenanceByVehicleRow {
                license_plate: row.license_plate,
                total: row.total,
                total_cost: decimal_to_f64(row.total_cost),
            })
            .collect())
    }
}

fn decimal_to_f64(value: Option<Decimal>) -> f64 {
    value.and_then(|v| v.to_f64()).unwrap_or(0.0)
}
