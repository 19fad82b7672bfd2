//! Estado de la CNH de los motoristas
//!
//! Clasificación del vencimiento de la licencia de conducir: vencida,
//! por vencer dentro del mes, por vencer dentro del trimestre o vigente.

use chrono::NaiveDate;
use serde::Serialize;

/// Días de anticipación para la alerta fuerte
pub const EXPIRY_WARNING_DAYS: i64 = 30;
/// Días de anticipación para el primer aviso
pub const EXPIRY_NOTICE_DAYS: i64 = 90;

/// Status derivado de la licencia de un motorista
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LicenseStatus {
    Expired { days_overdue: i64 },
    ExpiresWithinMonth { days_left: i64 },
    ExpiresWithinQuarter { days_left: i64 },
    Valid,
}

impl LicenseStatus {
    pub fn is_alert(&self) -> bool {
        !matches!(self, LicenseStatus::Valid)
    }
}

/// Días hasta el vencimiento (negativo si ya venció)
pub fn days_until_expiry(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

/// Evaluar el status de la licencia a una fecha dada
pub fn evaluate(expiry: NaiveDate, today: NaiveDate) -> LicenseStatus {
    let days = days_until_expiry(expiry, today);
    if days < 0 {
        LicenseStatus::Expired { days_overdue: -days }
    } else if days <= EXPIRY_WARNING_DAYS {
        LicenseStatus::ExpiresWithinMonth { days_left: days }
    } else if days <= EXPIRY_NOTICE_DAYS {
        LicenseStatus::ExpiresWithinQuarter { days_left: days }
    } else {
        LicenseStatus::Valid
    }
}

/// Mensaje para el usuario; `None` cuando la licencia está vigente
pub fn alert_message(expiry: NaiveDate, today: NaiveDate) -> Option<String> {
    match evaluate(expiry, today) {
        LicenseStatus::Expired { days_overdue } => Some(format!(
            "🔴 CNH VENCIDA hace {} día(s)",
            days_overdue
        )),
        LicenseStatus::ExpiresWithinMonth { days_left } => {
            Some(format!("⚠️ CNH vence en {} día(s)", days_left))
        }
        LicenseStatus::ExpiresWithinQuarter { days_left } => {
            Some(format!("⚡ CNH vence en {} día(s)", days_left))
        }
        LicenseStatus::Valid => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expired_license() {
        let status = evaluate(date(2026, 1, 1), date(2026, 1, 11));
        assert_eq!(status, LicenseStatus::Expired { days_overdue: 10 });
        assert!(status.is_alert());
    }

    #[test]
    fn test_expires_today_is_within_month() {
        let status = evaluate(date(2026, 1, 11), date(2026, 1, 11));
        assert_eq!(status, LicenseStatus::ExpiresWithinMonth { days_left: 0 });
    }

    #[test]
    fn test_expires_within_month() {
        let status = evaluate(date(2026, 2, 1), date(2026, 1, 11));
        assert_eq!(status, LicenseStatus::ExpiresWithinMonth { days_left: 21 });
    }

    #[test]
    fn test_expires_within_quarter() {
        let status = evaluate(date(2026, 3, 11), date(2026, 1, 11));
        assert_eq!(status, LicenseStatus::ExpiresWithinQuarter { days_left: 59 });
    }

    #[test]
    fn test_valid_license() {
        let status = evaluate(date(2027, 1, 1), date(2026, 1, 11));
        assert_eq!(status, LicenseStatus::Valid);
        assert!(alert_message(date(2027, 1, 1), date(2026, 1, 11)).is_none());
    }
}
