//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y normalización de campos de entrada.

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    static ref CPF_DIGITS: Regex = Regex::new(r"^\d{11}$").unwrap();
    static ref PLATE_CHARS: Regex = Regex::new(r"^[A-Z0-9]{5,10}$").unwrap();
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a tiempo (acepta HH:MM y HH:MM:SS)
pub fn validate_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            let mut error = ValidationError::new("time");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"HH:MM:SS".to_string());
            error
        })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum<T: PartialEq + std::fmt::Display + std::fmt::Debug + Serialize>(
    value: T,
    allowed_values: &[T],
) -> Result<(), ValidationError> {
    if !allowed_values.contains(&value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value);
        error.add_param("allowed_values".into(), &format!("{:?}", allowed_values));
        return Err(error);
    }
    Ok(())
}

/// Normalizar un CPF: quita puntuación y rellena con ceros a la izquierda
/// hasta 11 dígitos (las planillas suelen recortar los ceros iniciales).
/// Acepta el formato "Nombre - CPF" que exportan los selectores del sistema.
pub fn normalize_cpf(value: &str) -> String {
    let raw = match value.rsplit_once(" - ") {
        Some((_, tail)) => tail,
        None => value,
    };
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 11 {
        format!("{:0>11}", digits)
    } else {
        digits
    }
}

/// Validar formato de CPF ya normalizado (11 dígitos)
pub fn validate_cpf(value: &str) -> Result<(), ValidationError> {
    if !CPF_DIGITS.is_match(value) {
        let mut error = ValidationError::new("cpf");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"11 digits".to_string());
        return Err(error);
    }
    Ok(())
}

/// Dar formato puntuado a un CPF normalizado (XXX.XXX.XXX-XX)
pub fn format_cpf(digits: &str) -> String {
    if digits.len() != 11 {
        return digits.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..]
    )
}

/// Normalizar una matrícula: mayúsculas, sin guiones ni espacios.
/// Acepta el formato "Modelo - Matrícula"; si llega concatenada sin separador
/// se asume que la matrícula son los últimos 7 caracteres (formato estándar).
pub fn normalize_license_plate(value: &str) -> String {
    let raw = match value.rsplit_once(" - ") {
        Some((_, tail)) => tail,
        None => value,
    };
    let clean: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_uppercase();
    if clean.len() > 7 {
        clean[clean.len() - 7..].to_string()
    } else {
        clean
    }
}

/// Validar formato de matrícula de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let clean = value.replace([' ', '-', '_'], "").to_uppercase();
    if !PLATE_CHARS.is_match(&clean) {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-15").is_ok());
        assert!(validate_date("2024/01/15").is_err());
        assert!(validate_date("15/01/2024").is_err());
    }

    #[test]
    fn test_validate_time() {
        assert!(validate_time("08:30:00").is_ok());
        assert!(validate_time("08:30").is_ok());
        assert!(validate_time("8h30").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("hola").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0).is_ok());
        assert!(validate_non_negative(10).is_ok());
        assert!(validate_non_negative(-1).is_err());
    }

    #[test]
    fn test_validate_enum() {
        let allowed = vec!["Revisión", "Frenos"];
        assert!(validate_enum("Frenos", &allowed).is_ok());
        assert!(validate_enum("Pintura", &allowed).is_err());
    }

    #[test]
    fn test_normalize_cpf() {
        assert_eq!(normalize_cpf("123.456.789-01"), "12345678901");
        // ceros iniciales recortados por la planilla
        assert_eq!(normalize_cpf("345678901"), "00345678901");
        assert_eq!(normalize_cpf("María Silva - 123.456.789-01"), "12345678901");
    }

    #[test]
    fn test_validate_cpf() {
        assert!(validate_cpf("12345678901").is_ok());
        assert!(validate_cpf("1234567890").is_err());
        assert!(validate_cpf("123.456.789-01").is_err());
    }

    #[test]
    fn test_format_cpf() {
        assert_eq!(format_cpf("12345678901"), "123.456.789-01");
        assert_eq!(format_cpf("123"), "123");
    }

    #[test]
    fn test_normalize_license_plate() {
        assert_eq!(normalize_license_plate("abc-1234"), "ABC1234");
        assert_eq!(normalize_license_plate("Fiat Uno - ABC1234"), "ABC1234");
        // concatenado sin separador: se queda con los últimos 7
        assert_eq!(normalize_license_plate("UNOABC1234"), "ABC1234");
    }

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate("ABC-1234").is_ok());
        assert!(validate_license_plate("A").is_err());
        assert!(validate_license_plate("ABCDEFGHIJK").is_err());
    }
}
