use num_traits::ToPrimitive;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::Vehicle;
use crate::repositories::fine_repository::FineRepository;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{referential_conflict_error, AppError};
use crate::utils::validation::{normalize_license_plate, validate_license_plate};

pub struct VehicleController {
    repository: VehicleRepository,
    fines: FineRepository,
    trips: TripRepository,
    maintenance: MaintenanceRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            fines: FineRepository::new(pool.clone()),
            trips: TripRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        validate_license_plate(&request.license_plate)
            .map_err(|_| AppError::ValidationError("La matrícula es inválida".to_string()))?;
        let license_plate = normalize_license_plate(&request.license_plate);

        let current_odometer = request.current_odometer.unwrap_or(0.0);
        if current_odometer < 0.0 {
            return Err(AppError::ValidationError(
                "El kilometraje no puede ser negativo".to_string(),
            ));
        }

        // Verificar unicidad de matrícula y RENAVAM
        if self.repository.plate_exists(&license_plate, None).await? {
            return Err(AppError::Conflict(
                "La matrícula ya está registrada".to_string(),
            ));
        }
        if self
            .repository
            .registration_exists(&request.registration_number, None)
            .await?
        {
            return Err(AppError::Conflict(
                "El RENAVAM ya está registrado".to_string(),
            ));
        }

        let vehicle = self
            .repository
            .create(
                license_plate,
                request.model,
                request.year,
                request.registration_number,
                current_odometer,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle_response(vehicle),
            "Vehículo registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(vehicle_response(vehicle))
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list().await?;
        Ok(vehicles.into_iter().map(vehicle_response).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let license_plate = match request.license_plate {
            Some(raw) => {
                validate_license_plate(&raw)
                    .map_err(|_| AppError::ValidationError("La matrícula es inválida".to_string()))?;
                let plate = normalize_license_plate(&raw);
                if self.repository.plate_exists(&plate, Some(id)).await? {
                    return Err(AppError::Conflict(
                        "La matrícula ya está registrada".to_string(),
                    ));
                }
                Some(plate)
            }
            None => None,
        };

        if let Some(ref registration) = request.registration_number {
            if self
                .repository
                .registration_exists(registration, Some(id))
                .await?
            {
                return Err(AppError::Conflict(
                    "El RENAVAM ya está registrado".to_string(),
                ));
            }
        }

        if let Some(odometer) = request.current_odometer {
            if odometer < 0.0 {
                return Err(AppError::ValidationError(
                    "El kilometraje no puede ser negativo".to_string(),
                ));
            }
        }

        let vehicle = self
            .repository
            .update(
                id,
                license_plate,
                request.model,
                request.year,
                request.registration_number,
                request.current_odometer,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle_response(vehicle),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let fine_count = self.fines.count_by_vehicle(id).await?;
        if fine_count > 0 {
            return Err(referential_conflict_error("vehículo", "multa(s) asociada(s)", fine_count));
        }

        let trip_count = self.trips.count_by_vehicle(id).await?;
        if trip_count > 0 {
            return Err(referential_conflict_error("vehículo", "viaje(s) asociado(s)", trip_count));
        }

        let maintenance_count = self.maintenance.count_by_vehicle(id).await?;
        if maintenance_count > 0 {
            return Err(referential_conflict_error(
                "vehículo",
                "mantenimiento(s) asociado(s)",
                maintenance_count,
            ));
        }

        self.repository.delete(id).await?;

        Ok(ApiResponse::message_only(
            "Vehículo eliminado exitosamente".to_string(),
        ))
    }
}

fn vehicle_response(vehicle: Vehicle) -> VehicleResponse {
    VehicleResponse {
        id: vehicle.id,
        license_plate: vehicle.license_plate,
        model: vehicle.model,
        year: vehicle.year,
        registration_number: vehicle.registration_number,
        current_odometer: vehicle.current_odometer.to_f64().unwrap_or(0.0),
        created_at: vehicle.created_at,
    }
}
