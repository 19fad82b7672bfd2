//! Importación masiva de viajes desde planillas CSV
//!
//! Columnas esperadas (con fila de encabezado): fecha, hora, motorista
//! (CPF), matrícula, origen, destino, distancia, odómetro final. Los
//! campos llegan como los exportan las planillas reales: CPF con
//! puntuación o sin ceros iniciales, matrícula pegada al modelo, decimales
//! con coma. Cada fila inválida se registra con su número de línea y el
//! lote continúa; ninguna fila aborta la importación completa.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::utils::validation::{
    normalize_cpf, normalize_license_plate, validate_cpf, validate_date, validate_time,
};

/// Fila de viaje ya parseada y normalizada, lista para resolver referencias
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedTripRow {
    /// Número de línea en la planilla (1-based, contando el encabezado)
    pub line: usize,
    pub trip_date: NaiveDate,
    pub departure_time: NaiveTime,
    /// CPF normalizado a 11 dígitos
    pub cpf: String,
    /// Matrícula normalizada
    pub license_plate: String,
    pub origin: String,
    pub destination: String,
    pub distance: Decimal,
    pub final_odometer: Option<Decimal>,
}

/// Error de una fila puntual de la planilla
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRowError {
    pub line: usize,
    pub message: String,
}

impl ImportRowError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Resultado del parseo de la planilla completa
#[derive(Debug, Default)]
pub struct ImportParseOutcome {
    pub rows: Vec<ImportedTripRow>,
    pub errors: Vec<ImportRowError>,
}

/// Parsear el contenido CSV de la planilla de viajes
pub fn parse_trips_csv(content: &str) -> Result<ImportParseOutcome, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut outcome = ImportParseOutcome::default();

    for (index, result) in reader.records().enumerate() {
        // línea 1 es el encabezado
        let line = index + 2;
        let record = result?;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let get = |i: usize| record.get(i).unwrap_or("").trim().to_string();

        let date_raw = get(0);
        let time_raw = get(1);
        let cpf_raw = get(2);
        let plate_raw = get(3);
        let origin = get(4);
        let destination = get(5);
        let distance_raw = get(6);
        let final_odometer_raw = get(7);

        if date_raw.is_empty() || time_raw.is_empty() || cpf_raw.is_empty() || plate_raw.is_empty()
        {
            outcome.errors.push(ImportRowError::new(
                line,
                "Faltan campos obligatorios (Fecha, Hora, Motorista, Matrícula)",
            ));
            continue;
        }

        let trip_date = match parse_flexible_date(&date_raw) {
            Some(date) => date,
            None => {
                outcome.errors.push(ImportRowError::new(
                    line,
                    format!("Fecha inválida: '{}'", date_raw),
                ));
                continue;
            }
        };

        let departure_time = match parse_flexible_time(&time_raw) {
            Some(time) => time,
            None => {
                outcome.errors.push(ImportRowError::new(
                    line,
                    format!("Hora inválida: '{}'", time_raw),
                ));
                continue;
            }
        };

        let cpf = normalize_cpf(&cpf_raw);
        if validate_cpf(&cpf).is_err() {
            outcome.errors.push(ImportRowError::new(
                line,
                format!("CPF inválido: '{}'", cpf_raw),
            ));
            continue;
        }

        let license_plate = normalize_license_plate(&plate_raw);
        if license_plate.is_empty() {
            outcome.errors.push(ImportRowError::new(
                line,
                format!("Matrícula inválida: '{}'", plate_raw),
            ));
            continue;
        }

        // valores numéricos ilegibles se toman como 0, igual que el resto
        // del sistema hace con las planillas históricas
        let distance = parse_decimal_field(&distance_raw).unwrap_or(Decimal::ZERO);
        let final_odometer = parse_decimal_field(&final_odometer_raw);

        outcome.rows.push(ImportedTripRow {
            line,
            trip_date,
            departure_time,
            cpf,
            license_plate,
            origin,
            destination,
            distance,
            final_odometer,
        });
    }

    Ok(outcome)
}

/// Fecha en formato ISO o dd/mm/yyyy (las planillas brasileñas usan el segundo)
fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    validate_date(value)
        .ok()
        .or_else(|| NaiveDate::parse_from_str(value, "%d/%m/%Y").ok())
}

fn parse_flexible_time(value: &str) -> Option<NaiveTime> {
    validate_time(value).ok()
}

/// Decimal con coma o punto; vacío o ilegible es `None`
fn parse_decimal_field(value: &str) -> Option<Decimal> {
    if value.is_empty() {
        return None;
    }
    value.replace(',', ".").parse::<Decimal>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Fecha,Hora,Motorista,Matrícula,Origen,Destino,Distancia,KM Final\n";

    #[test]
    fn test_parse_well_formed_row() {
        let csv = format!(
            "{}2026-03-10,08:30,123.456.789-01,ABC-1234,Base,Puerto,120.5,\n",
            HEADER
        );
        let outcome = parse_trips_csv(&csv).unwrap();
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.rows.len(), 1);

        let row = &outcome.rows[0];
        assert_eq!(row.line, 2);
        assert_eq!(row.cpf, "12345678901");
        assert_eq!(row.license_plate, "ABC1234");
        assert_eq!(row.distance, "120.5".parse::<Decimal>().unwrap());
        assert_eq!(row.final_odometer, None);
    }

    #[test]
    fn test_parse_comma_decimals_and_br_date() {
        let csv = format!(
            "{}10/03/2026,08:30:00,12345678901,ABC1234,Base,Puerto,\"120,5\",\"45870,0\"\n",
            HEADER
        );
        let outcome = parse_trips_csv(&csv).unwrap();
        assert_eq!(outcome.rows.len(), 1);
        let row = &outcome.rows[0];
        assert_eq!(row.trip_date, NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert_eq!(row.distance, "120.5".parse::<Decimal>().unwrap());
        assert_eq!(row.final_odometer, Some(Decimal::from(45870)));
    }

    #[test]
    fn test_parse_selector_formats() {
        // los selectores del sistema exportan "Nombre - CPF" y "Modelo - Matrícula"
        let csv = format!(
            "{}2026-03-10,08:30,María Silva - 345678901,Fiat Uno - abc1234,Base,Puerto,50,\n",
            HEADER
        );
        let outcome = parse_trips_csv(&csv).unwrap();
        assert_eq!(outcome.rows.len(), 1);
        let row = &outcome.rows[0];
        // CPF recortado por la planilla, rellenado con ceros
        assert_eq!(row.cpf, "00345678901");
        assert_eq!(row.license_plate, "ABC1234");
    }

    #[test]
    fn test_missing_required_fields_collects_error() {
        let csv = format!("{}2026-03-10,,12345678901,ABC1234,Base,Puerto,50,\n", HEADER);
        let outcome = parse_trips_csv(&csv).unwrap();
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].line, 2);
        assert!(outcome.errors[0].message.contains("obligatorios"));
    }

    #[test]
    fn test_bad_row_does_not_abort_batch() {
        let csv = format!(
            "{}fecha-mala,08:30,12345678901,ABC1234,Base,Puerto,50,\n2026-03-11,09:00,12345678901,ABC1234,Puerto,Base,60,\n",
            HEADER
        );
        let outcome = parse_trips_csv(&csv).unwrap();
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].line, 2);
        assert_eq!(outcome.rows[0].line, 3);
    }

    #[test]
    fn test_unreadable_distance_becomes_zero() {
        let csv = format!(
            "{}2026-03-10,08:30,12345678901,ABC1234,Base,Puerto,n/a,\n",
            HEADER
        );
        let outcome = parse_trips_csv(&csv).unwrap();
        assert_eq!(outcome.rows[0].distance, Decimal::ZERO);
    }

    #[test]
    fn test_empty_rows_are_skipped() {
        let csv = format!("{},,,,,,,\n", HEADER);
        let outcome = parse_trips_csv(&csv).unwrap();
        assert!(outcome.rows.is_empty());
        assert!(outcome.errors.is_empty());
    }
}
