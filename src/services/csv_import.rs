//! Import masivo de rutas desde CSV
//!
//! Este módulo parsea un payload de texto delimitado a borradores de
//! entrada validados. Las filas malformadas se saltan y se reportan;
//! el import solo falla entero si no sobrevive ninguna fila válida.
//!
//! Formato: `name, start_lat, start_lng, end_lat, end_lng[, driver_salary]`
//! con cabecera opcional y campos opcionalmente entrecomillados.

use crate::models::geo::GeoPoint;
use crate::models::route_entry::RouteEntryDraft;
use crate::utils::errors::{ClientResult, EngineError};

/// Tokens que identifican la fila de cabecera (case-insensitive)
const HEADER_TOKENS: [&str; 2] = ["name", "start_lat"];

/// Fila descartada durante el import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Línea 1-based dentro del texto original
    pub line: u64,
    pub reason: String,
}

/// Resultado del import: borradores válidos más el reporte de descartes
#[derive(Debug)]
pub struct CsvImportReport {
    pub entries: Vec<RouteEntryDraft>,
    pub skipped: Vec<SkippedRow>,
}

/// Parsear un payload CSV a borradores de ruta.
///
/// Nunca falla por filas malformadas individuales; devuelve
/// `EngineError::Format` solo cuando el texto no produce ninguna fila
/// válida.
pub fn parse(text: &str) -> ClientResult<CsvImportReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut entries: Vec<RouteEntryDraft> = Vec::new();
    let mut skipped: Vec<SkippedRow> = Vec::new();
    let mut is_first_record = true;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                is_first_record = false;
                skipped.push(SkippedRow {
                    line,
                    reason: format!("unreadable row: {}", e),
                });
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if is_first_record {
            is_first_record = false;
            if looks_like_header(&record) {
                // Cabecera: se consume, no cuenta como dato
                continue;
            }
        }

        match parse_row(&record, entries.len() + 1) {
            Ok(draft) => entries.push(draft),
            Err(reason) => skipped.push(SkippedRow { line, reason }),
        }
    }

    if entries.is_empty() {
        return Err(EngineError::Format(format!(
            "CSV import produced no valid routes ({} rows skipped)",
            skipped.len()
        )));
    }

    log::info!(
        "📋 CSV import: {} routes parsed, {} rows skipped",
        entries.len(),
        skipped.len()
    );

    Ok(CsvImportReport { entries, skipped })
}

fn looks_like_header(record: &csv::StringRecord) -> bool {
    record.iter().any(|field| {
        let lower = field.to_ascii_lowercase();
        HEADER_TOKENS.iter().any(|token| lower.contains(token))
    })
}

/// Parsear una fila de datos; `ordinal` es la posición 1-based entre las
/// filas válidas, usada para el nombre por defecto
fn parse_row(record: &csv::StringRecord, ordinal: usize) -> Result<RouteEntryDraft, String> {
    if record.len() < 5 {
        return Err(format!("expected at least 5 columns, got {}", record.len()));
    }

    let start_lat = parse_coordinate(record.get(1), "start_lat")?;
    let start_lng = parse_coordinate(record.get(2), "start_lng")?;
    let end_lat = parse_coordinate(record.get(3), "end_lat")?;
    let end_lng = parse_coordinate(record.get(4), "end_lng")?;

    let start = GeoPoint::new(start_lat, start_lng).map_err(|e| e.to_string())?;
    let end = GeoPoint::new(end_lat, end_lng).map_err(|e| e.to_string())?;

    // Sexta columna opcional: salario por conductor; no numérico no es error
    let driver_salary = record
        .get(5)
        .and_then(|field| field.parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value > 0.0);

    let name_field = record.get(0).unwrap_or("").trim();
    let name = if name_field.is_empty() {
        format!("Route {}", ordinal)
    } else {
        name_field.to_string()
    };

    let mut draft = RouteEntryDraft::new(name, start, end);
    draft.driver_salary = driver_salary;
    Ok(draft)
}

fn parse_coordinate(field: Option<&str>, label: &str) -> Result<f64, String> {
    let raw = field.unwrap_or("").trim();
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("{} '{}' is not a number", label, raw))?;
    if !value.is_finite() {
        return Err(format!("{} '{}' is not finite", label, raw));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_out_of_range_latitude() {
        let text = "name,start_lat,start_lng,end_lat,end_lng\nBerlin-Munich,52.52,13.405,48.137,11.575\nBad,999,13.4,48.1,11.5\n";
        let report = parse(text).unwrap();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].name, "Berlin-Munich");
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].reason.to_lowercase().contains("latitude"));
    }

    #[test]
    fn test_first_line_without_header_tokens_is_data() {
        let text = "Berlin-Munich,52.52,13.405,48.137,11.575\nHamburg-Frankfurt,53.55,9.99,50.11,8.68\n";
        let report = parse(text).unwrap();
        assert_eq!(report.entries.len(), 2);
    }

    #[test]
    fn test_header_detection_is_case_insensitive() {
        let text = "NAME,START_LAT,START_LNG,END_LAT,END_LNG\nBerlin-Munich,52.52,13.405,48.137,11.575\n";
        let report = parse(text).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_quoted_fields_are_unwrapped() {
        let text = "\"Berlin-Munich\",\"52.52\",\"13.405\",\"48.137\",\"11.575\"\n";
        let report = parse(text).unwrap();
        assert_eq!(report.entries[0].name, "Berlin-Munich");
        assert_eq!(report.entries[0].start.lat, 52.52);
    }

    #[test]
    fn test_optional_salary_column() {
        let text = "A,52.52,13.405,48.137,11.575,28.5\nB,52.52,13.405,48.137,11.575,not-a-number\nC,52.52,13.405,48.137,11.575\n";
        let report = parse(text).unwrap();
        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.entries[0].driver_salary, Some(28.5));
        // No numérico no es error, solo queda sin salario
        assert_eq!(report.entries[1].driver_salary, None);
        assert_eq!(report.entries[2].driver_salary, None);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_empty_name_gets_positional_default() {
        let text = ",52.52,13.405,48.137,11.575\nBad,999,0,0,0\n,53.55,9.99,50.11,8.68\n";
        let report = parse(text).unwrap();
        assert_eq!(report.entries.len(), 2);
        // La numeración cuenta solo filas válidas
        assert_eq!(report.entries[0].name, "Route 1");
        assert_eq!(report.entries[1].name, "Route 2");
    }

    #[test]
    fn test_too_few_columns_is_skipped() {
        let text = "A,52.52,13.405,48.137,11.575\nshort,1,2\n";
        let report = parse(text).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].reason.contains("5 columns"));
    }

    #[test]
    fn test_non_numeric_coordinate_is_skipped() {
        let text = "A,52.52,13.405,48.137,11.575\nB,abc,13.4,48.1,11.5\n";
        let report = parse(text).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].reason.contains("not a number"));
    }

    #[test]
    fn test_counting_property_entries_plus_skipped() {
        let text = "name,start_lat,start_lng,end_lat,end_lng\nA,52.52,13.405,48.137,11.575\nB,999,13.4,48.1,11.5\nshort,1\nC,53.55,9.99,50.11,8.68\n";
        let report = parse(text).unwrap();
        // 4 líneas de datos tras retirar la cabecera
        assert_eq!(report.entries.len() + report.skipped.len(), 4);
    }

    #[test]
    fn test_zero_valid_rows_fails_with_format_error() {
        let text = "Bad,999,13.4,48.1,11.5\nWorse,abc,def,ghi,jkl\n";
        match parse(text) {
            Err(EngineError::Format(_)) => {}
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_fails_with_format_error() {
        assert!(matches!(parse(""), Err(EngineError::Format(_))));
        assert!(matches!(parse("\n\n"), Err(EngineError::Format(_))));
    }

    #[test]
    fn test_import_is_idempotent_per_row_set() {
        let text = "A,52.52,13.405,48.137,11.575\nB,53.55,9.99,50.11,8.68\n";
        let first = parse(text).unwrap();
        let second = parse(text).unwrap();
        assert_eq!(first.entries, second.entries);
    }
}
