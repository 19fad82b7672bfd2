use chrono::Utc;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::trip_dto::{
    CreateTripRequest, ImportSummaryResponse, TripListResponse, TripResponse, UpdateTripRequest,
};
use crate::models::{Trip, TripWithRefs};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::fine_repository::FineRepository;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::maintenance_advisor;
use crate::services::mileage;
use crate::services::trip_import::{self, ImportedTripRow};
use crate::utils::errors::AppError;

/// Máximo de errores de importación que se detallan en el mensaje
const IMPORT_ERRORS_SHOWN: usize = 5;

pub struct TripController {
    pool: PgPool,
    repository: TripRepository,
    drivers: DriverRepository,
    vehicles: VehicleRepository,
    fines: FineRepository,
    maintenance: MaintenanceRepository,
}

impl TripController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TripRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            fines: FineRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(
        &self,
        request: CreateTripRequest,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        request.validate()?;

        let distance = to_decimal(request.distance.unwrap_or(0.0), "distancia")?;
        let final_odometer = request
            .final_odometer
            .map(|value| to_decimal(value, "odómetro final"))
            .transpose()?;

        self.drivers
            .find_by_id(request.driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorista no encontrado".to_string()))?;
        self.vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        // Alta del viaje y ajuste del contador en una sola transacción;
        // la fila del vehículo queda bloqueada hasta el commit
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error starting transaction: {}", e)))?;

        let effect =
            mileage::register_trip(&mut tx, request.vehicle_id, distance, final_odometer).await?;

        let trip = Trip {
            id: Uuid::new_v4(),
            trip_date: request.trip_date,
            departure_time: request.departure_time,
            driver_id: request.driver_id,
            vehicle_id: request.vehicle_id,
            origin: request.origin,
            destination: request.destination,
            distance,
            final_odometer,
            applied_delta: effect.applied_delta,
            created_at: Utc::now(),
        };
        let trip = self.repository.insert(&mut tx, &trip).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error committing transaction: {}", e)))?;

        let mut message = "Viaje registrado exitosamente".to_string();
        if ledger_touched(distance, final_odometer) {
            if let Some(alert) = self
                .maintenance_alert(request.vehicle_id, effect.new_reading)
                .await?
            {
                message.push(' ');
                message.push_str(&alert);
            }
        }

        Ok(ApiResponse::success_with_message(trip_response(trip), message))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TripResponse, AppError> {
        let trip = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viaje no encontrado".to_string()))?;

        Ok(trip_response(trip))
    }

    pub async fn list(&self) -> Result<Vec<TripListResponse>, AppError> {
        let trips = self.repository.list().await?;
        Ok(trips.into_iter().map(trip_list_response).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateTripRequest,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        request.validate()?;

        let distance = to_decimal(request.distance.unwrap_or(0.0), "distancia")?;
        let final_odometer = request
            .final_odometer
            .map(|value| to_decimal(value, "odómetro final"))
            .transpose()?;

        self.drivers
            .find_by_id(request.driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Motorista no encontrado".to_string()))?;
        self.vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error starting transaction: {}", e)))?;

        let previous = self
            .repository
            .find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viaje no encontrado".to_string()))?;

        // La edición es diferencial: primero se revierte el delta que el
        // viaje aplicó, luego se aplican los datos nuevos. Si el viaje
        // cambió de vehículo, cada contador recibe su parte.
        let effect = if previous.vehicle_id == request.vehicle_id {
            mileage::rebase_trip(
                &mut tx,
                request.vehicle_id,
                previous.applied_delta,
                distance,
                final_odometer,
            )
            .await?
        } else {
            mileage::revert_trip(&mut tx, previous.vehicle_id, previous.applied_delta).await?;
            mileage::register_trip(&mut tx, request.vehicle_id, distance, final_odometer).await?
        };

        let trip = Trip {
            id,
            trip_date: request.trip_date,
            departure_time: request.departure_time,
            driver_id: request.driver_id,
            vehicle_id: request.vehicle_id,
            origin: request.origin,
            destination: request.destination,
            distance,
            final_odometer,
            applied_delta: effect.applied_delta,
            created_at: previous.created_at,
        };
        let trip = self.repository.update(&mut tx, &trip).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error committing transaction: {}", e)))?;

        let mut message = "Viaje actualizado exitosamente".to_string();
        if ledger_touched(distance, final_odometer) {
            if let Some(alert) = self
                .maintenance_alert(request.vehicle_id, effect.new_reading)
                .await?
            {
                message.push(' ');
                message.push_str(&alert);
            }
        }

        Ok(ApiResponse::success_with_message(trip_response(trip), message))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error starting transaction: {}", e)))?;

        let trip = self
            .repository
            .find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viaje no encontrado".to_string()))?;

        // Una multa asociada bloquea el borrado; la transacción se
        // descarta sin tocar el viaje ni el contador
        let fine_count = self.fines.count_by_trip(&mut tx, id).await?;
        if fine_count > 0 {
            return Err(AppError::ReferentialConflict(format!(
                "No se puede eliminar: este viaje tiene {} multa(s) asociada(s)",
                fine_count
            )));
        }

        mileage::revert_trip(&mut tx, trip.vehicle_id, trip.applied_delta).await?;
        self.repository.delete(&mut tx, id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error committing transaction: {}", e)))?;

        Ok(ApiResponse::message_only(
            "Viaje eliminado exitosamente".to_string(),
        ))
    }

    /// Importar viajes desde una planilla CSV. Cada fila válida pasa por
    /// la misma regla de contador que el alta manual, salvo que una
    /// lectura final menor a la vigente no es error: el contador solo se
    /// sobrescribe si la lectura es mayor.
    pub async fn import(
        &self,
        csv_content: &str,
    ) -> Result<ApiResponse<ImportSummaryResponse>, AppError> {
        let outcome = trip_import::parse_trips_csv(csv_content)
            .map_err(|e| AppError::BadRequest(format!("Error al leer la planilla: {}", e)))?;

        let mut imported = 0usize;
        let mut errors: Vec<String> = outcome
            .errors
            .iter()
            .map(|e| format!("Línea {}: {}", e.line, e.message))
            .collect();

        for row in &outcome.rows {
            match self.import_row(row).await {
                Ok(()) => imported += 1,
                Err(AppError::DatabaseError(msg)) => {
                    // un fallo de infraestructura sí aborta el lote
                    return Err(AppError::DatabaseError(msg));
                }
                Err(e) => {
                    let detail = match e {
                        AppError::NotFound(msg)
                        | AppError::ValidationError(msg)
                        | AppError::Conflict(msg) => msg,
                        other => other.to_string(),
                    };
                    errors.push(format!("Línea {}: {}", row.line, detail));
                }
            }
        }

        let mut message = if imported > 0 {
            format!("{} viaje(s) importado(s) exitosamente", imported)
        } else {
            "No se importó ningún viaje".to_string()
        };
        for error in errors.iter().take(IMPORT_ERRORS_SHOWN) {
            message.push_str(&format!(" | {}", error));
        }
        if errors.len() > IMPORT_ERRORS_SHOWN {
            message.push_str(&format!(
                " | Y {} error(es) más. Verifique la planilla",
                errors.len() - IMPORT_ERRORS_SHOWN
            ));
        }

        let summary = ImportSummaryResponse {
            imported,
            failed: errors.len(),
            errors,
        };

        Ok(ApiResponse::success_with_message(summary, message))
    }

    async fn import_row(&self, row: &ImportedTripRow) -> Result<(), AppError> {
        let driver = self
            .drivers
            .find_by_cpf(&row.cpf)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Motorista con CPF {} no encontrado", row.cpf))
            })?;
        let vehicle = self
            .vehicles
            .find_by_plate(&row.license_plate)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Vehículo con matrícula {} no encontrado",
                    row.license_plate
                ))
            })?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error starting transaction: {}", e)))?;

        let effect = mileage::register_imported_trip(
            &mut tx,
            vehicle.id,
            row.distance,
            row.final_odometer,
        )
        .await?;

        let trip = Trip {
            id: Uuid::new_v4(),
            trip_date: row.trip_date,
            departure_time: row.departure_time,
            driver_id: driver.id,
            vehicle_id: vehicle.id,
            origin: row.origin.clone(),
            destination: row.destination.clone(),
            distance: row.distance,
            final_odometer: row.final_odometer,
            applied_delta: effect.applied_delta,
            created_at: Utc::now(),
        };
        self.repository.insert(&mut tx, &trip).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error committing transaction: {}", e)))?;

        Ok(())
    }

    /// Consultar el asesor con la lectura recién aplicada; el aviso se
    /// anexa al mensaje de éxito del alta/edición. Solo se consulta cuando
    /// la regla de contador llegó a disparar.
    async fn maintenance_alert(
        &self,
        vehicle_id: Uuid,
        new_reading: Decimal,
    ) -> Result<Option<String>, AppError> {
        if new_reading <= Decimal::ZERO {
            return Ok(None);
        }
        let next_service = self
            .maintenance
            .max_next_service_odometer(vehicle_id)
            .await?;
        Ok(maintenance_advisor::alert_message(new_reading, next_service))
    }
}

fn trip_response(trip: Trip) -> TripResponse {
    TripResponse {
        id: trip.id,
        trip_date: trip.trip_date,
        departure_time: trip.departure_time,
        driver_id: trip.driver_id,
        vehicle_id: trip.vehicle_id,
        origin: trip.origin,
        destination: trip.destination,
        distance: trip.distance.to_f64().unwrap_or(0.0),
        final_odometer: trip.final_odometer.and_then(|v| v.to_f64()),
        created_at: trip.created_at,
    }
}

fn trip_list_response(trip: TripWithRefs) -> TripListResponse {
    TripListResponse {
        id: trip.id,
        trip_date: trip.trip_date,
        departure_time: trip.departure_time,
        origin: trip.origin,
        destination: trip.destination,
        distance: trip.distance.to_f64().unwrap_or(0.0),
        final_odometer: trip.final_odometer.and_then(|v| v.to_f64()),
        driver_id: trip.driver_id,
        driver_name: trip.driver_name,
        vehicle_id: trip.vehicle_id,
        license_plate: trip.license_plate,
        vehicle_model: trip.vehicle_model,
    }
}

fn to_decimal(value: f64, field: &str) -> Result<Decimal, AppError> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| AppError::ValidationError(format!("Valor inválido para {}", field)))
}

fn ledger_touched(distance: Decimal, final_odometer: Option<Decimal>) -> bool {
    distance > Decimal::ZERO || final_odometer.map_or(false, |k| k > Decimal::ZERO)
}
