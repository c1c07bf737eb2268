//! Batch CSV ingest.
//!
//! Turns a CSV of heterogeneous requests into `DemandRequest`s. One row per request:
//!
//! `id,use,bedrooms,building,dwellings,category,occupants,temperature_c`
//!
//! - `use` is `residential` or `tertiary`; each use only reads its own columns
//! - `building` is `single` or `collective` (`collective` requires `dwellings`)
//! - empty `temperature_c` falls back to the configured default
//!
//! Bad rows do not abort the run: they are collected as `RowError`s with their
//! line number so the caller can report them next to the computed results.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::domain::{BuildingKind, DemandRequest};
use crate::error::{AppError, DemandError};
use crate::tables::lookup_category;

/// A raw CSV row. Everything but `id` and `use` is optional at this stage.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestRow {
    pub id: String,
    #[serde(rename = "use")]
    pub building_use: String,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub dwellings: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub occupants: Option<u32>,
    #[serde(default)]
    pub temperature_c: Option<f64>,
}

impl RequestRow {
    /// Build the typed request, rejecting rows missing a field their variant needs.
    pub fn to_request(&self, default_temperature_c: f64) -> Result<DemandRequest, DemandError> {
        let t = self.temperature_c.unwrap_or(default_temperature_c);
        match self.building_use.trim().to_ascii_lowercase().as_str() {
            "residential" => {
                let bedrooms = self
                    .bedrooms
                    .ok_or_else(|| DemandError::invalid("residential row is missing 'bedrooms'"))?;
                match parse_building(self.building.as_deref())? {
                    BuildingKind::Single => Ok(DemandRequest::single_dwelling(bedrooms, t)),
                    BuildingKind::Collective => {
                        let dwellings = self
                            .dwellings
                            .ok_or_else(|| DemandError::invalid("collective building is missing 'dwellings'"))?;
                        Ok(DemandRequest::collective(bedrooms, dwellings, t))
                    }
                }
            }
            "tertiary" => {
                let name = self
                    .category
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
                    .ok_or_else(|| DemandError::invalid("tertiary row is missing 'category'"))?;
                let category = lookup_category(name)?;
                let occupants = self
                    .occupants
                    .ok_or_else(|| DemandError::invalid("tertiary row is missing 'occupants'"))?;
                Ok(DemandRequest::tertiary(category, occupants, t))
            }
            other => Err(DemandError::invalid(format!(
                "use must be 'residential' or 'tertiary' (got '{other}')"
            ))),
        }
    }
}

fn parse_building(value: Option<&str>) -> Result<BuildingKind, DemandError> {
    match value.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("single") => Ok(BuildingKind::Single),
        Some("collective") => Ok(BuildingKind::Collective),
        Some(other) => Err(DemandError::invalid(format!(
            "building must be 'single' or 'collective' (got '{other}')"
        ))),
    }
}

/// A row-level error encountered during ingest or calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// A successfully parsed row, ready for the calculator.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub line: usize,
    pub id: String,
    pub request: DemandRequest,
}

/// Ingest output: typed requests + row errors.
#[derive(Debug, Clone, Default)]
pub struct BatchInput {
    pub requests: Vec<PendingRequest>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load a batch CSV from disk.
pub fn load_requests(path: &Path, default_temperature_c: f64) -> Result<BatchInput, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_requests(file, default_temperature_c)
}

/// Parse batch CSV from any reader.
pub fn read_requests<R: Read>(input: R, default_temperature_c: f64) -> Result<BatchInput, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    for required in ["id", "use"] {
        if !headers.iter().any(|h| h == required) {
            return Err(AppError::new(2, format!("CSV is missing required column '{required}'.")));
        }
    }

    let mut out = BatchInput::default();
    for (idx, result) in reader.deserialize::<RequestRow>().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        out.rows_read += 1;

        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(line, "skipping unparseable row: {e}");
                out.row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match row.to_request(default_temperature_c) {
            Ok(request) => out.requests.push(PendingRequest { line, id: row.id, request }),
            Err(e) => {
                warn!(line, id = %row.id, "skipping row: {e}");
                out.row_errors.push(RowError {
                    line,
                    id: Some(row.id),
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BuildingUse, ResidentialBuilding, TertiaryUse};

    const CSV: &str = "\
id,use,bedrooms,building,dwellings,category,occupants,temperature_c
house,residential,2,single,,,,
block,residential,4,collective,10,,,
clinic,tertiary,,,,Hospitals and clinics,1,30
bad-block,residential,3,collective,,,,
spa,tertiary,,,,Spa,4,
office,tertiary,,,,offices,10,45
";

    #[test]
    fn parses_rows_and_collects_errors() {
        let batch = read_requests(CSV.as_bytes(), 60.0).unwrap();
        assert_eq!(batch.rows_read, 6);
        assert_eq!(batch.requests.len(), 4);
        assert_eq!(batch.row_errors.len(), 2);

        assert_eq!(batch.requests[0].id, "house");
        assert_eq!(batch.requests[0].request, DemandRequest::single_dwelling(2, 60.0));
        assert_eq!(batch.requests[1].request, DemandRequest::collective(4, 10, 60.0));
        assert_eq!(
            batch.requests[2].request,
            DemandRequest::tertiary(TertiaryUse::HospitalsAndClinics, 1, 30.0)
        );
        assert_eq!(batch.requests[3].request.service_temperature_c, 45.0);

        let missing = &batch.row_errors[0];
        assert_eq!(missing.line, 5);
        assert_eq!(missing.id.as_deref(), Some("bad-block"));
        assert!(missing.message.contains("dwellings"));

        let unknown = &batch.row_errors[1];
        assert_eq!(unknown.line, 6);
        assert!(unknown.message.contains("Unknown tertiary-use category 'Spa'"));
    }

    #[test]
    fn building_defaults_to_single() {
        let row = RequestRow {
            id: "h".to_string(),
            building_use: "Residential".to_string(),
            bedrooms: Some(3),
            building: None,
            dwellings: Some(12),
            category: None,
            occupants: None,
            temperature_c: None,
        };
        let req = row.to_request(55.0).unwrap();
        assert_eq!(
            req.building_use,
            BuildingUse::Residential {
                bedrooms: 3,
                building: ResidentialBuilding::SingleDwelling
            }
        );
        assert_eq!(req.service_temperature_c, 55.0);
    }

    #[test]
    fn unknown_use_is_invalid_input() {
        let row = RequestRow {
            id: "x".to_string(),
            building_use: "industrial".to_string(),
            bedrooms: None,
            building: None,
            dwellings: None,
            category: None,
            occupants: None,
            temperature_c: None,
        };
        assert!(matches!(row.to_request(60.0), Err(DemandError::InvalidInput(_))));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let err = read_requests("name,bedrooms\nx,2\n".as_bytes(), 60.0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("'id'"));
    }
}
