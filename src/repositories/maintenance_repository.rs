use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::{MaintenanceRecord, MaintenanceWithVehicle};
use crate::utils::errors::AppError;

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar un mantenimiento dentro de la transacción que puede
    /// adelantar el contador del vehículo
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &MaintenanceRecord,
    ) -> Result<MaintenanceRecord, AppError> {
        let inserted = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records (id, vehicle_id, service_date, service_type, description,
                                             odometer_at_service, next_service_odometer, next_service_date,
                                             cost, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.vehicle_id)
        .bind(record.service_date)
        .bind(&record.service_type)
        .bind(&record.description)
        .bind(record.odometer_at_service)
        .bind(record.next_service_odometer)
        .bind(record.next_service_date)
        .bind(record.cost)
        .bind(record.created_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating maintenance record: {}", e)))?;

        Ok(inserted)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRecord>, AppError> {
        let record =
            sqlx::query_as::<_, MaintenanceRecord>("SELECT * FROM maintenance_records WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(format!("Error finding maintenance record: {}", e))
                })?;

        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<MaintenanceWithVehicle>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceWithVehicle>(
            r#"
            SELECT m.id, m.service_date, m.service_type, m.description,
                   m.odometer_at_service, m.next_service_odometer, m.next_service_date, m.cost,
                   v.id AS vehicle_id, v.license_plate, v.model AS vehicle_model
            FROM maintenance_records m
            JOIN vehicles v ON m.vehicle_id = v.id
            ORDER BY m.service_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing maintenance records: {}", e)))?;

        Ok(records)
    }

    /// La edición no dispara conciliación de contador: el registro es un
    /// hecho histórico, solo se corrigen sus campos descriptivos
    pub async fn update(
        &self,
        id: Uuid,
        service_date: Option<NaiveDate>,
        service_type: Option<String>,
        description: Option<String>,
        next_service_odometer: Option<Decimal>,
        next_service_date: Option<NaiveDate>,
        cost: Option<Decimal>,
    ) -> Result<MaintenanceRecord, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mantenimiento no encontrado".to_string()))?;

        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            UPDATE maintenance_records
            SET service_date = $2, service_type = $3, description = $4,
                next_service_odometer = $5, next_service_date = $6, cost = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(service_date.unwrap_or(current.service_date))
        .bind(service_type.unwrap_or(current.service_type))
        .bind(description.or(current.description))
        .bind(next_service_odometer.or(current.next_service_odometer))
        .bind(next_service_date.or(current.next_service_date))
        .bind(cost.unwrap_or(current.cost))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating maintenance record: {}", e)))?;

        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error deleting maintenance record: {}", e)))?;

        Ok(())
    }

    /// Máximo `next_service_odometer` del vehículo: varios servicios
    /// pendientes colapsan en una sola señal para el asesor
    pub async fn max_next_service_odometer(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Option<Decimal>, AppError> {
        let result: (Option<Decimal>,) = sqlx::query_as(
            "SELECT MAX(next_service_odometer) FROM maintenance_records WHERE vehicle_id = $1",
        )
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error reading next service: {}", e)))?;

        Ok(result.0)
    }

    pub async fn count_by_vehicle(&self, vehicle_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM maintenance_records WHERE vehicle_id = $1")
                .bind(vehicle_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(format!("Error counting maintenance records: {}", e))
                })?;

        Ok(result.0)
    }
}
