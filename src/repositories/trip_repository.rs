use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::{Trip, TripWithRefs};
use crate::utils::errors::AppError;

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar un viaje dentro de la transacción que ajusta el contador
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        trip: &Trip,
    ) -> Result<Trip, AppError> {
        let inserted = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (id, trip_date, departure_time, driver_id, vehicle_id,
                               origin, destination, distance, final_odometer, applied_delta, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(trip.id)
        .bind(trip.trip_date)
        .bind(trip.departure_time)
        .bind(trip.driver_id)
        .bind(trip.vehicle_id)
        .bind(&trip.origin)
        .bind(&trip.destination)
        .bind(trip.distance)
        .bind(trip.final_odometer)
        .bind(trip.applied_delta)
        .bind(trip.created_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating trip: {}", e)))?;

        Ok(inserted)
    }

    /// Reemplazar los campos de un viaje dentro de la transacción de edición
    pub async fn update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        trip: &Trip,
    ) -> Result<Trip, AppError> {
        let updated = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET trip_date = $2, departure_time = $3, driver_id = $4, vehicle_id = $5,
                origin = $6, destination = $7, distance = $8, final_odometer = $9, applied_delta = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(trip.id)
        .bind(trip.trip_date)
        .bind(trip.departure_time)
        .bind(trip.driver_id)
        .bind(trip.vehicle_id)
        .bind(&trip.origin)
        .bind(&trip.destination)
        .bind(trip.distance)
        .bind(trip.final_odometer)
        .bind(trip.applied_delta)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating trip: {}", e)))?;

        Ok(updated)
    }

    pub async fn delete(&self, tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error deleting trip: {}", e)))?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding trip: {}", e)))?;

        Ok(trip)
    }

    /// Leer un viaje bloqueando su fila; el `applied_delta` leído es el que
    /// se revierte, no puede cambiar por debajo de la transacción
    pub async fn find_by_id_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding trip: {}", e)))?;

        Ok(trip)
    }

    pub async fn list(&self) -> Result<Vec<TripWithRefs>, AppError> {
        let trips = sqlx::query_as::<_, TripWithRefs>(
            r#"
            SELECT t.id, t.trip_date, t.departure_time, t.origin, t.destination,
                   t.distance, t.final_odometer,
                   d.id AS driver_id, d.full_name AS driver_name,
                   v.id AS vehicle_id, v.license_plate, v.model AS vehicle_model
            FROM trips t
            JOIN drivers d ON t.driver_id = d.id
            JOIN vehicles v ON t.vehicle_id = v.id
            ORDER BY t.trip_date DESC, t.departure_time DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing trips: {}", e)))?;

        Ok(trips)
    }

    pub async fn count_by_driver(&self, driver_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trips WHERE driver_id = $1")
            .bind(driver_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error counting trips: {}", e)))?;

        Ok(result.0)
    }

    pub async fn count_by_vehicle(&self, vehicle_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trips WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error counting trips: {}", e)))?;

        Ok(result.0)
    }
}
