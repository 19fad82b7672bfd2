//! Asesor de mantenimiento
//!
//! Función pura de dos números: la lectura actual del odómetro y el máximo
//! `next_service_odometer` entre los mantenimientos del vehículo (varios
//! servicios pendientes colapsan en una sola señal). No persiste estado:
//! el status se deriva fresco en cada consulta, por lo que siempre es
//! consistente con el contador.

use rust_decimal::Decimal;
use serde::Serialize;

/// Umbral fijo de aviso: a 1000 km o menos del próximo servicio
pub const NEXT_SERVICE_ALERT_KM: i64 = 1000;

/// Status derivado del vehículo respecto a su próximo servicio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MaintenanceStatus {
    /// El contador alcanzó o superó el odómetro del próximo servicio
    Overdue { overage: Decimal },
    /// Faltan 1000 km o menos para el próximo servicio
    DueSoon { remaining: Decimal },
    Ok,
}

impl MaintenanceStatus {
    pub fn is_alert(&self) -> bool {
        !matches!(self, MaintenanceStatus::Ok)
    }
}

/// Evaluar el status de mantenimiento de un vehículo
pub fn evaluate(current_odometer: Decimal, next_service_odometer: Option<Decimal>) -> MaintenanceStatus {
    let next = match next_service_odometer {
        Some(next) => next,
        None => return MaintenanceStatus::Ok,
    };

    if current_odometer >= next {
        MaintenanceStatus::Overdue {
            overage: current_odometer - next,
        }
    } else if next - current_odometer <= Decimal::from(NEXT_SERVICE_ALERT_KM) {
        MaintenanceStatus::DueSoon {
            remaining: next - current_odometer,
        }
    } else {
        MaintenanceStatus::Ok
    }
}

/// Mensaje de alerta para el usuario; `None` cuando no hay nada que avisar
pub fn alert_message(
    current_odometer: Decimal,
    next_service_odometer: Option<Decimal>,
) -> Option<String> {
    match evaluate(current_odometer, next_service_odometer) {
        MaintenanceStatus::Overdue { .. } => Some(format!(
            "⚠️ ¡MANTENIMIENTO VENCIDO! El vehículo alcanzó {} km; la próxima revisión era a los {} km.",
            current_odometer.round_dp(0),
            next_service_odometer?.round_dp(0)
        )),
        MaintenanceStatus::DueSoon { remaining } => Some(format!(
            "⚠️ Mantenimiento próximo: faltan {} km para la revisión.",
            remaining.round_dp(0)
        )),
        MaintenanceStatus::Ok => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn km(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_due_soon_at_500_remaining() {
        let status = evaluate(km(9500), Some(km(10000)));
        assert_eq!(status, MaintenanceStatus::DueSoon { remaining: km(500) });
        assert!(status.is_alert());
    }

    #[test]
    fn test_overdue_by_500() {
        let status = evaluate(km(10500), Some(km(10000)));
        assert_eq!(status, MaintenanceStatus::Overdue { overage: km(500) });
    }

    #[test]
    fn test_ok_when_far_from_service() {
        assert_eq!(evaluate(km(5000), Some(km(10000))), MaintenanceStatus::Ok);
        assert!(alert_message(km(5000), Some(km(10000))).is_none());
    }

    #[test]
    fn test_ok_without_scheduled_service() {
        assert_eq!(evaluate(km(5000), None), MaintenanceStatus::Ok);
    }

    #[test]
    fn test_exactly_at_next_service_is_overdue() {
        let status = evaluate(km(10000), Some(km(10000)));
        assert_eq!(status, MaintenanceStatus::Overdue { overage: km(0) });
    }

    #[test]
    fn test_exactly_at_threshold_is_due_soon() {
        let status = evaluate(km(9000), Some(km(10000)));
        assert_eq!(status, MaintenanceStatus::DueSoon { remaining: km(1000) });
    }

    #[test]
    fn test_alert_messages() {
        let overdue = alert_message(km(10500), Some(km(10000))).unwrap();
        assert!(overdue.contains("MANTENIMIENTO VENCIDO"));
        assert!(overdue.contains("10500"));

        let due_soon = alert_message(km(9500), Some(km(10000))).unwrap();
        assert!(due_soon.contains("faltan 500 km"));
    }
}
