use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::{Fine, FineWithRefs};
use crate::utils::errors::AppError;

pub struct FineRepository {
    pool: PgPool,
}

impl FineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, fine: &Fine) -> Result<Fine, AppError> {
        let inserted = sqlx::query_as::<_, Fine>(
            r#"
            INSERT INTO fines (id, fine_date, fine_time, location, violation_type, description,
                               driver_id, vehicle_id, amount, trip_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(fine.id)
        .bind(fine.fine_date)
        .bind(fine.fine_time)
        .bind(&fine.location)
        .bind(&fine.violation_type)
        .bind(&fine.description)
        .bind(fine.driver_id)
        .bind(fine.vehicle_id)
        .bind(fine.amount)
        .bind(fine.trip_id)
        .bind(fine.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating fine: {}", e)))?;

        Ok(inserted)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Fine>, AppError> {
        let fine = sqlx::query_as::<_, Fine>("SELECT * FROM fines WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding fine: {}", e)))?;

        Ok(fine)
    }

    pub async fn list(&self) -> Result<Vec<FineWithRefs>, AppError> {
        let fines = sqlx::query_as::<_, FineWithRefs>(
            r#"
            SELECT f.id, f.fine_date, f.fine_time, f.location, f.violation_type,
                   f.description, f.amount,
                   d.id AS driver_id, d.full_name AS driver_name,
                   v.id AS vehicle_id, v.license_plate, v.model AS vehicle_model,
                   f.trip_id
            FROM fines f
            JOIN drivers d ON f.driver_id = d.id
            JOIN vehicles v ON f.vehicle_id = v.id
            ORDER BY f.fine_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing fines: {}", e)))?;

        Ok(fines)
    }

    pub async fn update(&self, fine: &Fine) -> Result<Fine, AppError> {
        let updated = sqlx::query_as::<_, Fine>(
            r#"
            UPDATE fines
            SET fine_date = $2, fine_time = $3, location = $4, violation_type = $5,
                description = $6, driver_id = $7, vehicle_id = $8, amount = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(fine.id)
        .bind(fine.fine_date)
        .bind(fine.fine_time)
        .bind(&fine.location)
        .bind(&fine.violation_type)
        .bind(&fine.description)
        .bind(fine.driver_id)
        .bind(fine.vehicle_id)
        .bind(fine.amount)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating fine: {}", e)))?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM fines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error deleting fine: {}", e)))?;

        Ok(())
    }

    pub async fn count_by_driver(&self, driver_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM fines WHERE driver_id = $1")
            .bind(driver_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error counting fines: {}", e)))?;

        Ok(result.0)
    }

    pub async fn count_by_vehicle(&self, vehicle_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM fines WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error counting fines: {}", e)))?;

        Ok(result.0)
    }

    /// Conteo dentro de la transacción de borrado de viaje: el bloqueo
    /// por multas asociadas y la reversión del contador se deciden con la
    /// misma foto de los datos
    pub async fn count_by_trip(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        trip_id: Uuid,
    ) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM fines WHERE trip_id = $1")
            .bind(trip_id)
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error counting fines: {}", e)))?;

        Ok(result.0)
    }
}
