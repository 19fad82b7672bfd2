use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::driver_dto::{CreateDriverRequest, DriverResponse, UpdateDriverRequest};
use crate::models::Driver;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::fine_repository::FineRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::services::license_status;
use crate::utils::errors::{referential_conflict_error, AppError};
use crate::utils::validation::{normalize_cpf, validate_cpf};

pub struct DriverController {
    repository: DriverRepository,
    fines: FineRepository,
    trips: TripRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool.clone()),
            fines: FineRepository::new(pool.clone()),
            trips: TripRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        request.validate()?;

        let cpf = normalize_cpf(&request.cpf);
        validate_cpf(&cpf)
            .map_err(|_| AppError::ValidationError("El CPF debe tener 11 dígitos".to_string()))?;

        // Verificar unicidad de CPF y CNH
        if self.repository.cpf_exists(&cpf, None).await? {
            return Err(AppError::Conflict("El CPF ya está registrado".to_string()));
        }
        if self
            .repository
            .license_number_exists(&request.license_number, None)
            .await?
        {
            return Err(AppError::Conflict("La CNH ya está registrada".to_string()));
        }

        let driver = self
            .repository
            .create(
                request.full_name,
                cpf,
                request.license_number,
                request.license_expiry,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            driver_response(driver),
            "Motorista registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<DriverResponse, AppError> {
        let driver = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorista no encontrado".to_string()))?;

        Ok(driver_response(driver))
    }

    pub async fn list(&self) -> Result<Vec<DriverResponse>, AppError> {
        let drivers = self.repository.list().await?;
        Ok(drivers.into_iter().map(driver_response).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        request.validate()?;

        let cpf = match request.cpf {
            Some(raw) => {
                let cpf = normalize_cpf(&raw);
                validate_cpf(&cpf).map_err(|_| {
                    AppError::ValidationError("El CPF debe tener 11 dígitos".to_string())
                })?;
                if self.repository.cpf_exists(&cpf, Some(id)).await? {
                    return Err(AppError::Conflict("El CPF ya está registrado".to_string()));
                }
                Some(cpf)
            }
            None => None,
        };

        if let Some(ref license_number) = request.license_number {
            if self
                .repository
                .license_number_exists(license_number, Some(id))
                .await?
            {
                return Err(AppError::Conflict("La CNH ya está registrada".to_string()));
            }
        }

        let driver = self
            .repository
            .update(
                id,
                request.full_name,
                cpf,
                request.license_number,
                request.license_expiry,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            driver_response(driver),
            "Motorista actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorista no encontrado".to_string()))?;

        let fine_count = self.fines.count_by_driver(id).await?;
        if fine_count > 0 {
            return Err(referential_conflict_error("motorista", "multa(s) asociada(s)", fine_count));
        }

        let trip_count = self.trips.count_by_driver(id).await?;
        if trip_count > 0 {
            return Err(referential_conflict_error("motorista", "viaje(s) asociado(s)", trip_count));
        }

        self.repository.delete(id).await?;

        Ok(ApiResponse::message_only(
            "Motorista eliminado exitosamente".to_string(),
        ))
    }
}

fn driver_response(driver: Driver) -> DriverResponse {
    let today = Utc::now().date_naive();
    DriverResponse {
        id: driver.id,
        full_name: driver.full_name,
        cpf: driver.cpf,
        license_number: driver.license_number,
        license_expiry: driver.license_expiry,
        license_status: license_status::evaluate(driver.license_expiry, today),
        created_at: driver.created_at,
    }
}
