//! Conciliación de kilometraje
//!
//! Reglas que mantienen consistente el odómetro acumulado de cada vehículo
//! a través del alta, edición y baja de viajes. La política es diferencial:
//! cada viaje guarda el delta exacto que aplicó al contador
//! (`applied_delta`); editar revierte ese delta antes de aplicar el nuevo,
//! borrar lo revierte tal cual. Así la conciliación es reversible e
//! idempotente en cualquier orden de operaciones.
//!
//! Las reglas puras operan sobre números planos. El acceso al contador
//! pasa por el trait `OdometerStore`: en producción lo implementa la
//! transacción de sqlx con bloqueo de fila (`SELECT ... FOR UPDATE`),
//! en tests un mapa en memoria.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

/// Resultado de aplicar un viaje sobre el contador del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEffect {
    /// Nueva lectura del odómetro
    pub new_reading: Decimal,
    /// Delta que este viaje aportó al contador (se guarda en el viaje)
    pub applied_delta: Decimal,
}

impl LedgerEffect {
    fn unchanged(current: Decimal) -> Self {
        Self {
            new_reading: current,
            applied_delta: Decimal::ZERO,
        }
    }
}

/// Efecto de crear un viaje (política estricta).
///
/// Una lectura absoluta positiva reemplaza el contador y debe ser mayor o
/// igual a la lectura vigente; en su defecto una distancia positiva lo
/// incrementa; sin ninguna de las dos el contador queda intacto.
pub fn trip_effect(
    current: Decimal,
    distance: Decimal,
    final_odometer: Option<Decimal>,
) -> AppResult<LedgerEffect> {
    if distance < Decimal::ZERO {
        return Err(AppError::ValidationError(
            "La distancia no puede ser negativa".to_string(),
        ));
    }

    match final_odometer.filter(|k| *k > Decimal::ZERO) {
        Some(k) => {
            if k < current {
                return Err(AppError::ValidationError(format!(
                    "La lectura final del odómetro ({}) es menor que la lectura actual del vehículo ({})",
                    k, current
                )));
            }
            Ok(LedgerEffect {
                new_reading: k,
                applied_delta: k - current,
            })
        }
        None if distance > Decimal::ZERO => Ok(LedgerEffect {
            new_reading: current + distance,
            applied_delta: distance,
        }),
        None => Ok(LedgerEffect::unchanged(current)),
    }
}

/// Efecto de un viaje importado de planilla (política tolerante).
///
/// Igual que `trip_effect`, salvo que una lectura absoluta menor o igual a
/// la vigente no es error: la fila se registra y el contador queda intacto
/// (sobrescribir solo si es mayor).
pub fn imported_trip_effect(
    current: Decimal,
    distance: Decimal,
    final_odometer: Option<Decimal>,
) -> AppResult<LedgerEffect> {
    if distance < Decimal::ZERO {
        return Err(AppError::ValidationError(
            "La distancia no puede ser negativa".to_string(),
        ));
    }

    match final_odometer.filter(|k| *k > Decimal::ZERO) {
        Some(k) if k > current => Ok(LedgerEffect {
            new_reading: k,
            applied_delta: k - current,
        }),
        Some(_) => Ok(LedgerEffect::unchanged(current)),
        None if distance > Decimal::ZERO => Ok(LedgerEffect {
            new_reading: current + distance,
            applied_delta: distance,
        }),
        None => Ok(LedgerEffect::unchanged(current)),
    }
}

/// Efecto de editar un viaje: revierte el delta previamente aplicado y
/// aplica los nuevos datos sobre esa base.
pub fn rebase_effect(
    current: Decimal,
    previous_delta: Decimal,
    distance: Decimal,
    final_odometer: Option<Decimal>,
) -> AppResult<LedgerEffect> {
    let base = current - previous_delta;
    trip_effect(base, distance, final_odometer)
}

/// Lectura resultante de revertir un viaje borrado
pub fn reverted_reading(current: Decimal, applied_delta: Decimal) -> Decimal {
    current - applied_delta
}

/// Acceso al contador de odómetro de un vehículo.
///
/// Interfaz explícita inyectada en la lógica de conciliación: producción
/// usa la transacción con bloqueo de fila, los tests un store en memoria.
#[async_trait]
pub trait OdometerStore {
    /// Lectura vigente del odómetro del vehículo
    async fn current_reading(&mut self, vehicle_id: Uuid) -> AppResult<Decimal>;

    /// Persistir una nueva lectura del odómetro
    async fn write_reading(&mut self, vehicle_id: Uuid, reading: Decimal) -> AppResult<()>;
}

#[async_trait]
impl<'c> OdometerStore for Transaction<'c, Postgres> {
    async fn current_reading(&mut self, vehicle_id: Uuid) -> AppResult<Decimal> {
        // FOR UPDATE: la fila del vehículo queda bloqueada hasta el commit,
        // dos altas simultáneas sobre el mismo vehículo se serializan.
        let row: Option<(Decimal,)> =
            sqlx::query_as("SELECT current_odometer FROM vehicles WHERE id = $1 FOR UPDATE")
                .bind(vehicle_id)
                .fetch_optional(&mut **self)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Error reading odometer: {}", e)))?;

        row.map(|(reading,)| reading)
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))
    }

    async fn write_reading(&mut self, vehicle_id: Uuid, reading: Decimal) -> AppResult<()> {
        let result = sqlx::query("UPDATE vehicles SET current_odometer = $2 WHERE id = $1")
            .bind(vehicle_id)
            .bind(reading)
            .execute(&mut **self)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error updating odometer: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }
        Ok(())
    }
}

/// Aplicar el alta de un viaje sobre el store (política estricta)
pub async fn register_trip<S>(
    store: &mut S,
    vehicle_id: Uuid,
    distance: Decimal,
    final_odometer: Option<Decimal>,
) -> AppResult<LedgerEffect>
where
    S: OdometerStore + Send,
{
    let current = store.current_reading(vehicle_id).await?;
    let effect = trip_effect(current, distance, final_odometer)?;
    if effect.new_reading != current {
        store.write_reading(vehicle_id, effect.new_reading).await?;
    }
    Ok(effect)
}

/// Aplicar el alta de un viaje importado (sobrescribir solo si es mayor)
pub async fn register_imported_trip<S>(
    store: &mut S,
    vehicle_id: Uuid,
    distance: Decimal,
    final_odometer: Option<Decimal>,
) -> AppResult<LedgerEffect>
where
    S: OdometerStore + Send,
{
    let current = store.current_reading(vehicle_id).await?;
    let effect = imported_trip_effect(current, distance, final_odometer)?;
    if effect.new_reading != current {
        store.write_reading(vehicle_id, effect.new_reading).await?;
    }
    Ok(effect)
}

/// Aplicar la edición de un viaje: revertir el delta anterior y aplicar
/// los nuevos datos en una sola escritura
pub async fn rebase_trip<S>(
    store: &mut S,
    vehicle_id: Uuid,
    previous_delta: Decimal,
    distance: Decimal,
    final_odometer: Option<Decimal>,
) -> AppResult<LedgerEffect>
where
    S: OdometerStore + Send,
{
    let current = store.current_reading(vehicle_id).await?;
    let effect = rebase_effect(current, previous_delta, distance, final_odometer)?;
    if effect.new_reading != current {
        store.write_reading(vehicle_id, effect.new_reading).await?;
    }
    Ok(effect)
}

/// Revertir exactamente el delta de un viaje borrado
pub async fn revert_trip<S>(
    store: &mut S,
    vehicle_id: Uuid,
    applied_delta: Decimal,
) -> AppResult<Decimal>
where
    S: OdometerStore + Send,
{
    let current = store.current_reading(vehicle_id).await?;
    let reverted = reverted_reading(current, applied_delta);
    if reverted != current {
        store.write_reading(vehicle_id, reverted).await?;
    }
    Ok(reverted)
}

/// Efecto de registrar un mantenimiento: la lectura tomada en el taller es
/// autoritativa y adelanta el contador si lo supera (sobrescribir solo si
/// es mayor). Devuelve la nueva lectura cuando corresponde escribirla.
pub fn service_reading_effect(current: Decimal, odometer_at_service: Decimal) -> Option<Decimal> {
    (odometer_at_service > current).then_some(odometer_at_service)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn km(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_trip_effect_distance_only() {
        let effect = trip_effect(km(1000), km(250), None).unwrap();
        assert_eq!(effect.new_reading, km(1250));
        assert_eq!(effect.applied_delta, km(250));
    }

    #[test]
    fn test_trip_effect_absolute_overrides_distance() {
        let effect = trip_effect(km(1000), km(250), Some(km(1500))).unwrap();
        assert_eq!(effect.new_reading, km(1500));
        assert_eq!(effect.applied_delta, km(500));
    }

    #[test]
    fn test_trip_effect_no_inputs_is_noop() {
        let effect = trip_effect(km(1000), Decimal::ZERO, None).unwrap();
        assert_eq!(effect.new_reading, km(1000));
        assert_eq!(effect.applied_delta, Decimal::ZERO);
    }

    #[test]
    fn test_trip_effect_zero_absolute_falls_back_to_distance() {
        let effect = trip_effect(km(1000), km(100), Some(Decimal::ZERO)).unwrap();
        assert_eq!(effect.new_reading, km(1100));
    }

    #[test]
    fn test_trip_effect_rejects_negative_distance() {
        assert!(matches!(
            trip_effect(km(1000), km(-5), None),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_trip_effect_rejects_absolute_below_current() {
        assert!(matches!(
            trip_effect(km(1000), Decimal::ZERO, Some(km(900))),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_imported_effect_keeps_ledger_when_absolute_below_current() {
        let effect = imported_trip_effect(km(1000), Decimal::ZERO, Some(km(900))).unwrap();
        assert_eq!(effect.new_reading, km(1000));
        assert_eq!(effect.applied_delta, Decimal::ZERO);
    }

    #[test]
    fn test_rebase_reverts_previous_delta_first() {
        // viaje original aportó 300; se edita a distancia 100
        let effect = rebase_effect(km(1300), km(300), km(100), None).unwrap();
        assert_eq!(effect.new_reading, km(1100));
        assert_eq!(effect.applied_delta, km(100));
    }

    #[test]
    fn test_rebase_with_new_absolute_reading() {
        let effect = rebase_effect(km(1300), km(300), Decimal::ZERO, Some(km(2000))).unwrap();
        assert_eq!(effect.new_reading, km(2000));
        assert_eq!(effect.applied_delta, km(1000));
    }

    #[test]
    fn test_revert_round_trips_creation() {
        let created = trip_effect(km(1000), km(250), None).unwrap();
        let reverted = reverted_reading(created.new_reading, created.applied_delta);
        assert_eq!(reverted, km(1000));
    }

    #[test]
    fn test_service_reading_effect_only_advances() {
        assert_eq!(service_reading_effect(km(1000), km(1200)), Some(km(1200)));
        assert_eq!(service_reading_effect(km(1000), km(800)), None);
        assert_eq!(service_reading_effect(km(1000), km(1000)), None);
    }
}
