use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Driver;
use crate::utils::errors::AppError;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        full_name: String,
        cpf: String,
        license_number: String,
        license_expiry: NaiveDate,
    ) -> Result<Driver, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, full_name, cpf, license_number, license_expiry, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(full_name)
        .bind(cpf)
        .bind(license_number)
        .bind(license_expiry)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating driver: {}", e)))?;

        Ok(driver)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding driver: {}", e)))?;

        Ok(driver)
    }

    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE cpf = $1")
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding driver by cpf: {}", e)))?;

        Ok(driver)
    }

    pub async fn list(&self) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY full_name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error listing drivers: {}", e)))?;

        Ok(drivers)
    }

    pub async fn cpf_exists(&self, cpf: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE cpf = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(cpf)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error checking cpf: {}", e)))?;

        Ok(result.0)
    }

    pub async fn license_number_exists(
        &self,
        license_number: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE license_number = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(license_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error checking license number: {}", e)))?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        full_name: Option<String>,
        cpf: Option<String>,
        license_number: Option<String>,
        license_expiry: Option<NaiveDate>,
    ) -> Result<Driver, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorista no encontrado".to_string()))?;

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET full_name = $2, cpf = $3, license_number = $4, license_expiry = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name.unwrap_or(current.full_name))
        .bind(cpf.unwrap_or(current.cpf))
        .bind(license_number.unwrap_or(current.license_number))
        .bind(license_expiry.unwrap_or(current.license_expiry))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating driver: {}", e)))?;

        Ok(driver)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error deleting driver: {}", e)))?;

        Ok(())
    }
}
