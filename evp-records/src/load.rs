//! Dataset loading: CSV, JSON and gzip-compressed CSV.
//!
//! Every loader is all-or-nothing at the source level: an unreadable file,
//! a corrupt gzip stream, malformed CSV structure or a missing required column
//! fails the whole load with a descriptive error. Individual rows that fail
//! validation (see [`RecordError`](crate::error::RecordError)) are skipped and
//! counted instead.
//!
//! # Formats
//!
//! - **CSV** (has headers): the Washington State EV population export, e.g.
//!   `VIN (1-10),County,City,State,Postal Code,Model Year,Make,Model,Electric Vehicle Type,...,Electric Range,...,DOL Vehicle ID,...`
//! - **JSON**: an array of objects with camelCase keys (`modelYear`,
//!   `electricVehicleType`, ...); values may be strings, numbers or null.
//! - **Gzip CSV**: the CSV format compressed with gzip (`.csv.gz`).

use crate::record::{RawVehicleRow, VehicleRecord};
use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use serde_json::Value as JsonValue;
use std::io::Read;
use std::path::Path;

/// Columns a CSV source must carry, as (export header, camelCase alias).
const REQUIRED_COLUMNS: [(&str, &str); 2] = [
    ("Model Year", "modelYear"),
    ("Electric Vehicle Type", "electricVehicleType"),
];

/// The outcome of a successful load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedRecords {
    pub records: Vec<VehicleRecord>,
    /// Rows rejected by validation
    pub skipped: usize,
}

impl LoadedRecords {
    fn push_row(&mut self, row_number: usize, row: RawVehicleRow) {
        match VehicleRecord::try_from(row) {
            Ok(record) => self.records.push(record),
            Err(e) => {
                log::warn!("[EVP] loader: Skipping row {}: {}", row_number, e);
                self.skipped += 1;
            }
        }
    }
}

/// Supported source encodings.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SourceFormat {
    Csv,
    Json,
    GzCsv,
}

impl SourceFormat {
    /// Guess the format from a file name or URL path by its extension.
    pub fn from_name(name: &str) -> Option<SourceFormat> {
        let lowered = name.to_ascii_lowercase();
        if lowered.ends_with(".gz") {
            Some(SourceFormat::GzCsv)
        } else if lowered.ends_with(".csv") {
            Some(SourceFormat::Csv)
        } else if lowered.ends_with(".json") {
            Some(SourceFormat::Json)
        } else {
            None
        }
    }
}

/// Parse the CSV export into records.
pub fn parse_csv(csv_data: &str) -> Result<LoadedRecords> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());

    let headers = rdr.headers().context("reading CSV header")?.clone();
    for (column, alias) in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column || h == alias) {
            bail!("CSV is missing required column '{}'", column);
        }
    }

    let mut loaded = LoadedRecords::default();
    for (i, result) in rdr.deserialize::<RawVehicleRow>().enumerate() {
        // header is line 1
        let row_number = i + 2;
        let row = result.with_context(|| format!("CSV row {row_number}"))?;
        loaded.push_row(row_number, row);
    }
    log::info!(
        "[EVP] loader: Loaded {} records from CSV ({} skipped)",
        loaded.records.len(),
        loaded.skipped
    );
    Ok(loaded)
}

/// Whole-valued floats (`2020.0`) render as integers so they parse as one.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Text of a JSON cell; numbers are rendered, null and missing become empty.
fn json_text(obj: &serde_json::Map<String, JsonValue>, key: &str) -> String {
    match obj.get(key) {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Number(n)) => number_text(n),
        Some(JsonValue::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Parse a JSON array of records.
pub fn parse_json(json_data: &str) -> Result<LoadedRecords> {
    let root: JsonValue = serde_json::from_str(json_data).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut loaded = LoadedRecords::default();
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let raw = RawVehicleRow {
            vin: json_text(obj, "vin"),
            dol_vehicle_id: json_text(obj, "dolVehicleId"),
            county: json_text(obj, "county"),
            city: json_text(obj, "city"),
            state: json_text(obj, "state"),
            model_year: json_text(obj, "modelYear"),
            make: json_text(obj, "make"),
            model: json_text(obj, "model"),
            electric_vehicle_type: json_text(obj, "electricVehicleType"),
            electric_range: json_text(obj, "electricRange"),
        };
        loaded.push_row(i, raw);
    }
    log::info!(
        "[EVP] loader: Loaded {} records from JSON ({} skipped)",
        loaded.records.len(),
        loaded.skipped
    );
    Ok(loaded)
}

/// Decompress a gzip stream into UTF-8 text.
pub fn decode_gz(bytes: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut text = String::new();
    decoder
        .read_to_string(&mut text)
        .context("decompressing gzip data")?;
    Ok(text)
}

/// Parse raw bytes in the given format.
pub fn parse_bytes(bytes: &[u8], format: SourceFormat) -> Result<LoadedRecords> {
    match format {
        SourceFormat::GzCsv => parse_csv(&decode_gz(bytes)?),
        SourceFormat::Csv => parse_csv(std::str::from_utf8(bytes).context("CSV is not UTF-8")?),
        SourceFormat::Json => parse_json(std::str::from_utf8(bytes).context("JSON is not UTF-8")?),
    }
}

/// Load a dataset file. Dispatch by extension.
///
/// Supported: `.csv`, `.json`, `.csv.gz` / `.gz`.
pub fn load_path(path: &Path) -> Result<LoadedRecords> {
    let name = path.to_string_lossy();
    let Some(format) = SourceFormat::from_name(&name) else {
        bail!("Unsupported dataset file: {}", path.display());
    };
    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_bytes(&bytes, format).with_context(|| format!("loading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const SAMPLE_CSV: &str = include_str!("../../fixtures/ev_population_sample.csv");
    const SAMPLE_JSON: &str = include_str!("../../fixtures/ev_population_sample.json");

    #[test]
    fn test_parse_sample_csv() {
        let loaded = parse_csv(SAMPLE_CSV).unwrap();
        assert_eq!(loaded.records.len(), 13);
        assert_eq!(loaded.skipped, 2);

        let first = &loaded.records[0];
        assert_eq!(first.vin, "5YJ3E1EB4L");
        assert_eq!(first.dol_vehicle_id, "125701579");
        assert_eq!(first.county, "King");
        assert_eq!(first.city, "Seattle");
        assert_eq!(first.state, "WA");
        assert_eq!(first.model_year, 2020);
        assert_eq!(first.make, "TESLA");
        assert_eq!(first.model, "MODEL 3");
        assert_eq!(first.electric_range, 308);
    }

    #[test]
    fn test_csv_preserves_source_order() {
        let loaded = parse_csv(SAMPLE_CSV).unwrap();
        let last = loaded.records.last().unwrap();
        assert_eq!(last.make, "JEEP");
        // empty range cell is "not reported"
        assert_eq!(last.electric_range, 0);
    }

    #[test]
    fn test_csv_missing_required_column() {
        let csv = "County,City\nKing,Seattle\n";
        let err = parse_csv(csv).unwrap_err();
        assert!(err.to_string().contains("Model Year"));
    }

    #[test]
    fn test_csv_accepts_camel_case_headers() {
        let csv = "vin,county,city,state,modelYear,make,model,electricVehicleType,electricRange\n\
                   ABC,King,Seattle,WA,2021,TESLA,MODEL Y,Battery Electric Vehicle (BEV),330\n";
        let loaded = parse_csv(csv).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].electric_range, 330);
    }

    #[test]
    fn test_csv_header_only_is_empty() {
        let csv = "Model Year,Electric Vehicle Type\n";
        let loaded = parse_csv(csv).unwrap();
        assert!(loaded.records.is_empty());
        assert_eq!(loaded.skipped, 0);
    }

    #[test]
    fn test_parse_sample_json() {
        let loaded = parse_json(SAMPLE_JSON).unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.records[0].dol_vehicle_id, "125701579");
        assert_eq!(loaded.records[1].model_year, 2022);
        assert_eq!(loaded.records[1].electric_range, 0);
    }

    #[test]
    fn test_json_whole_floats_are_integers() {
        let json = r#"[{"vin": "5YJ3E1EB4L", "modelYear": 2020.0, "make": "TESLA",
            "electricVehicleType": "Battery Electric Vehicle (BEV)", "electricRange": 308.0}]"#;
        let loaded = parse_json(json).unwrap();
        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.records[0].model_year, 2020);
        assert_eq!(loaded.records[0].electric_range, 308);

        let fractional = r#"[{"modelYear": 2020.5, "electricVehicleType": "BEV"}]"#;
        assert_eq!(parse_json(fractional).unwrap().skipped, 1);
    }

    #[test]
    fn test_json_must_be_array() {
        assert!(parse_json("{\"vin\": \"x\"}").is_err());
        assert!(parse_json("not json").is_err());
        assert!(parse_json("[1, 2]").is_err());
    }

    #[test]
    fn test_gz_round_trip_through_loader() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let loaded = parse_bytes(&compressed, SourceFormat::GzCsv).unwrap();
        assert_eq!(loaded.records.len(), 13);
    }

    #[test]
    fn test_corrupt_gz_fails() {
        let err = parse_bytes(b"definitely not gzip", SourceFormat::GzCsv).unwrap_err();
        assert!(err.to_string().contains("gzip"));
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(SourceFormat::from_name("ev.csv"), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_name("EV.CSV.GZ"), Some(SourceFormat::GzCsv));
        assert_eq!(SourceFormat::from_name("data/ev.json"), Some(SourceFormat::Json));
        assert_eq!(SourceFormat::from_name("ev.parquet"), None);
    }

    #[test]
    fn test_load_path_from_fixtures() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures/ev_population_sample.csv");
        let loaded = load_path(&path).unwrap();
        assert_eq!(loaded.records.len(), 13);

        let missing = Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures/missing.csv");
        assert!(load_path(&missing).is_err());
        assert!(load_path(Path::new("ev.parquet")).is_err());
    }
}
