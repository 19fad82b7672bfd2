use chrono::Utc;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::maintenance_dto::{
    CreateMaintenanceRequest, MaintenanceListResponse, MaintenanceResponse,
    UpdateMaintenanceRequest,
};
use crate::models::{MaintenanceRecord, MaintenanceWithVehicle, SERVICE_TYPES};
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::mileage::{self, OdometerStore};
use crate::utils::errors::AppError;
use crate::utils::validation::validate_enum;

pub struct MaintenanceController {
    pool: PgPool,
    repository: MaintenanceRepository,
    vehicles: VehicleRepository,
}

impl MaintenanceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: MaintenanceRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(
        &self,
        request: CreateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        request.validate()?;

        validate_enum(request.service_type.as_str(), &SERVICE_TYPES)
            .map_err(|_| AppError::ValidationError("Tipo de servicio inválido".to_string()))?;

        let odometer_at_service = to_decimal(request.odometer_at_service, "kilometraje realizado")?;
        if odometer_at_service < Decimal::ZERO {
            return Err(AppError::ValidationError(
                "El kilometraje realizado no puede ser negativo".to_string(),
            ));
        }

        let cost = to_decimal(request.cost, "valor")?;
        if cost < Decimal::ZERO {
            return Err(AppError::ValidationError(
                "El valor no puede ser negativo".to_string(),
            ));
        }

        let next_service_odometer = request
            .next_service_odometer
            .map(|value| to_decimal(value, "próximo servicio"))
            .transpose()?;

        self.vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        // Alta del registro y eventual avance del contador en una sola
        // transacción: la lectura del taller es autoritativa y adelanta el
        // contador del vehículo si lo supera
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error starting transaction: {}", e)))?;

        let current = tx.current_reading(request.vehicle_id).await?;
        if let Some(new_reading) = mileage::service_reading_effect(current, odometer_at_service) {
            tx.write_reading(request.vehicle_id, new_reading).await?;
        }

        let record = MaintenanceRecord {
            id: Uuid::new_v4(),
            vehicle_id: request.vehicle_id,
            service_date: request.service_date,
            service_type: request.service_type,
            description: request.description,
            odometer_at_service,
            next_service_odometer,
            next_service_date: request.next_service_date,
            cost,
            created_at: Utc::now(),
        };
        let record = self.repository.insert(&mut tx, &record).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error committing transaction: {}", e)))?;

        Ok(ApiResponse::success_with_message(
            maintenance_response(record),
            "Mantenimiento registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<MaintenanceResponse, AppError> {
        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mantenimiento no encontrado".to_string()))?;

        Ok(maintenance_response(record))
    }

    pub async fn list(&self) -> Result<Vec<MaintenanceListResponse>, AppError> {
        let records = self.repository.list().await?;
        Ok(records.into_iter().map(maintenance_list_response).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        request.validate()?;

        if let Some(ref service_type) = request.service_type {
            validate_enum(service_type.as_str(), &SERVICE_TYPES)
                .map_err(|_| AppError::ValidationError("Tipo de servicio inválido".to_string()))?;
        }

        let next_service_odometer = request
            .next_service_odometer
            .map(|value| to_decimal(value, "próximo servicio"))
            .transpose()?;
        let cost = request
            .cost
            .map(|value| to_decimal(value, "valor"))
            .transpose()?;
        if let Some(cost) = cost {
            if cost < Decimal::ZERO {
                return Err(AppError::ValidationError(
                    "El valor no puede ser negativo".to_string(),
                ));
            }
        }

        let record = self
            .repository
            .update(
                id,
                request.service_date,
                request.service_type,
                request.description,
                next_service_odometer,
                request.next_service_date,
                cost,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            maintenance_response(record),
            "Mantenimiento actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mantenimiento no encontrado".to_string()))?;

        self.repository.delete(id).await?;

        Ok(ApiResponse::message_only(
            "Mantenimiento eliminado exitosamente".to_string(),
        ))
    }
}

fn maintenance_response(record: MaintenanceRecord) -> MaintenanceResponse {
    MaintenanceResponse {
        id: record.id,
        vehicle_id: record.vehicle_id,
        service_date: record.service_date,
        service_type: record.service_type,
        description: record.description,
        odometer_at_service: record.odometer_at_service.to_f64().unwrap_or(0.0),
        next_service_odometer: record.next_service_odometer.and_then(|v| v.to_f64()),
        next_service_date: record.next_service_date,
        cost: record.cost.to_f64().unwrap_or(0.0),
        created_at: record.created_at,
    }
}

fn maintenance_list_response(record: MaintenanceWithVehicle) -> MaintenanceListResponse {
    MaintenanceListResponse {
        id: record.id,
        service_date: record.service_date,
        service_type: record.service_type,
        description: record.description,
        odometer_at_service: record.odometer_at_service.to_f64().unwrap_or(0.0),
        next_service_odometer: record.next_service_odometer.and_then(|v| v.to_f64()),
        next_service_date: record.next_service_date,
        cost: record.cost.to_f64().unwrap_or(0.0),
        vehicle_id: record.vehicle_id,
        license_plate: record.license_plate,
        vehicle_model: record.vehicle_model,
    }
}

fn to_decimal(value: f64, field: &str) -> Result<Decimal, AppError> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| AppError::ValidationError(format!("Valor inválido para {}", field)))
}
