use chrono::Utc;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::fine_dto::{CreateFineRequest, FineListResponse, FineResponse, UpdateFineRequest};
use crate::models::{Fine, FineWithRefs, VIOLATION_TYPES};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::fine_repository::FineRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_enum;

pub struct FineController {
    repository: FineRepository,
    drivers: DriverRepository,
    vehicles: VehicleRepository,
    trips: TripRepository,
}

impl FineController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FineRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            trips: TripRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateFineRequest,
    ) -> Result<ApiResponse<FineResponse>, AppError> {
        request.validate()?;

        validate_enum(request.violation_type.as_str(), &VIOLATION_TYPES)
            .map_err(|_| AppError::ValidationError("Tipo de infracción inválido".to_string()))?;

        let amount = Decimal::from_f64_retain(request.amount)
            .ok_or_else(|| AppError::ValidationError("Valor inválido".to_string()))?;
        if amount < Decimal::ZERO {
            return Err(AppError::ValidationError(
                "El valor no puede ser negativo".to_string(),
            ));
        }

        self.drivers
            .find_by_id(request.driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorista no encontrado".to_string()))?;
        self.vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;
        if let Some(trip_id) = request.trip_id {
            self.trips
                .find_by_id(trip_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Viaje no encontrado".to_string()))?;
        }

        let fine = Fine {
            id: Uuid::new_v4(),
            fine_date: request.fine_date,
            fine_time: request.fine_time,
            location: request.location,
            violation_type: request.violation_type,
            description: request.description,
            driver_id: request.driver_id,
            vehicle_id: request.vehicle_id,
            amount,
            trip_id: request.trip_id,
            created_at: Utc::now(),
        };
        let fine = self.repository.create(&fine).await?;

        Ok(ApiResponse::success_with_message(
            fine_response(fine),
            "Multa registrada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<FineResponse, AppError> {
        let fine = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Multa no encontrada".to_string()))?;

        Ok(fine_response(fine))
    }

    pub async fn list(&self) -> Result<Vec<FineListResponse>, AppError> {
        let fines = self.repository.list().await?;
        Ok(fines.into_iter().map(fine_list_response).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateFineRequest,
    ) -> Result<ApiResponse<FineResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Multa no encontrada".to_string()))?;

        if let Some(ref violation_type) = request.violation_type {
            validate_enum(violation_type.as_str(), &VIOLATION_TYPES)
                .map_err(|_| AppError::ValidationError("Tipo de infracción inválido".to_string()))?;
        }

        let amount = match request.amount {
            Some(value) => {
                let amount = Decimal::from_f64_retain(value)
                    .ok_or_else(|| AppError::ValidationError("Valor inválido".to_string()))?;
                if amount < Decimal::ZERO {
                    return Err(AppError::ValidationError(
                        "El valor no puede ser negativo".to_string(),
                    ));
                }
                amount
            }
            None => current.amount,
        };

        if let Some(driver_id) = request.driver_id {
            self.drivers
                .find_by_id(driver_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Motorista no encontrado".to_string()))?;
        }
        if let Some(vehicle_id) = request.vehicle_id {
            self.vehicles
                .find_by_id(vehicle_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;
        }

        let fine = Fine {
            id,
            fine_date: request.fine_date.unwrap_or(current.fine_date),
            fine_time: request.fine_time.or(current.fine_time),
            location: request.location.unwrap_or(current.location),
            violation_type: request.violation_type.unwrap_or(current.violation_type),
            description: request.description.or(current.description),
            driver_id: request.driver_id.unwrap_or(current.driver_id),
            vehicle_id: request.vehicle_id.unwrap_or(current.vehicle_id),
            amount,
            trip_id: current.trip_id,
            created_at: current.created_at,
        };
        let fine = self.repository.update(&fine).await?;

        Ok(ApiResponse::success_with_message(
            fine_response(fine),
            "Multa actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Multa no encontrada".to_string()))?;

        self.repository.delete(id).await?;

        Ok(ApiResponse::message_only(
            "Multa eliminada exitosamente".to_string(),
        ))
    }
}

fn fine_response(fine: Fine) -> FineResponse {
    FineResponse {
        id: fine.id,
        fine_date: fine.fine_date,
        fine_time: fine.fine_time,
        location: fine.location,
        violation_type: fine.violation_type,
        description: fine.description,
        driver_id: fine.driver_id,
        vehicle_id: fine.vehicle_id,
        amount: fine.amount.to_f64().unwrap_or(0.0),
        trip_id: fine.trip_id,
        created_at: fine.created_at,
    }
}

fn fine_list_response(fine: FineWithRefs) -> FineListResponse {
    FineListResponse {
        id: fine.id,
        fine_date: fine.fine_date,
        fine_time: fine.fine_time,
        location: fine.location,
        violation_type: fine.violation_type,
        description: fine.description,
        amount: fine.amount.to_f64().unwrap_or(0.0),
        driver_id: fine.driver_id,
        driver_name: fine.driver_name,
        vehicle_id: fine.vehicle_id,
        license_plate: fine.license_plate,
        vehicle_model: fine.vehicle_model,
        trip_id: fine.trip_id,
    }
}
