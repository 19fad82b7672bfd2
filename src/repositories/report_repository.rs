use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::utils::errors::AppError;

// Filas agregadas para reportes - solo datos planos, el renderizado
// (PDF/Excel) corre por cuenta de colaboradores externos

#[derive(Debug, sqlx::FromRow)]
pub struct FinesByDriverAgg {
    pub driver_name: String,
    pub total: i64,
    pub total_amount: Option<Decimal>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct FinesByVehicleAgg {
    pub license_plate: String,
    pub total: i64,
    pub total_amount: Option<Decimal>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct TripsByDriverAgg {
    pub driver_name: String,
    pub total: i64,
    pub total_distance: Option<Decimal>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct MaintenanceByVehicleAgg {
    pub license_plate: String,
    pub total: i64,
    pub total_cost: Option<Decimal>,
}

/// Vehículo con su máximo próximo servicio agendado, para el barrido de
/// alertas del dashboard
#[derive(Debug, sqlx::FromRow)]
pub struct VehicleServiceRow {
    pub id: Uuid,
    pub license_plate: String,
    pub model: String,
    pub current_odometer: Decimal,
    pub next_service_odometer: Option<Decimal>,
}

pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn fines_by_driver(&self) -> Result<Vec<FinesByDriverAgg>, AppError> {
        let rows = sqlx::query_as::<_, FinesByDriverAgg>(
            r#"
            SELECT d.full_name AS driver_name, COUNT(f.id) AS total, SUM(f.amount) AS total_amount
            FROM fines f
            JOIN drivers d ON f.driver_id = d.id
            GROUP BY d.full_name
            ORDER BY total DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error aggregating fines by driver: {}", e)))?;

        Ok(rows)
    }

    pub async fn fines_by_vehicle(&self) -> Result<Vec<FinesByVehicleAgg>, AppError> {
        let rows = sqlx::query_as::<_, FinesByVehicleAgg>(
            r#"
            SELECT v.license_plate, COUNT(f.id) AS total, SUM(f.amount) AS total_amount
            FROM fines f
            JOIN vehicles v ON f.vehicle_id = v.id
            GROUP BY v.license_plate
            ORDER BY total DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error aggregating fines by vehicle: {}", e)))?;

        Ok(rows)
    }

    pub async fn trips_by_driver(&self) -> Result<Vec<TripsByDriverAgg>, AppError> {
        let rows = sqlx::query_as::<_, TripsByDriverAgg>(
            r#"
            SELECT d.full_name AS driver_name, COUNT(t.id) AS total, SUM(t.distance) AS total_distance
            FROM trips t
            JOIN drivers d ON t.driver_id = d.id
            GROUP BY d.full_name
            ORDER BY total DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error aggregating trips by driver: {}", e)))?;

        Ok(rows)
    }

    pub async fn maintenance_by_vehicle(&self) -> Result<Vec<MaintenanceByVehicleAgg>, AppError> {
        let rows = sqlx::query_as::<_, MaintenanceByVehicleAgg>(
            r#"
            SELECT v.license_plate, COUNT(m.id) AS total, SUM(m.cost) AS total_cost
            FROM maintenance_records m
            JOIN vehicles v ON m.vehicle_id = v.id
            GROUP BY v.license_plate
            ORDER BY total DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Error aggregating maintenance by vehicle: {}", e))
        })?;

        Ok(rows)
    }

    /// Todos los vehículos con su MAX(next_service_odometer); el asesor
    /// se evalúa fresco por vehículo en cada render del dashboard
    pub async fn vehicles_with_next_service(&self) -> Result<Vec<VehicleServiceRow>, AppError> {
        let rows = sqlx::query_as::<_, VehicleServiceRow>(
            r#"
            SELECT v.id, v.license_plate, v.model, v.current_odometer,
                   MAX(m.next_service_odometer) AS next_service_odometer
            FROM vehicles v
            LEFT JOIN maintenance_records m ON v.id = m.vehicle_id
            GROUP BY v.id, v.license_plate, v.model, v.current_odometer
            ORDER BY v.license_plate
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error reading service schedule: {}", e)))?;

        Ok(rows)
    }

    pub async fn count_table(&self, table: &str) -> Result<i64, AppError> {
        // el nombre viene de un conjunto fijo interno, nunca de entrada de usuario
        let query = format!("SELECT COUNT(*) FROM {}", table);
        let result: (i64,) = sqlx::query_as(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error counting {}: {}", table, e)))?;

        Ok(result.0)
    }

    pub async fn total_fine_amount(&self) -> Result<Decimal, AppError> {
        let result: (Option<Decimal>,) = sqlx::query_as("SELECT SUM(amount) FROM fines")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error totaling fines: {}", e)))?;

        Ok(result.0.unwrap_or(Decimal::ZERO))
    }
}
