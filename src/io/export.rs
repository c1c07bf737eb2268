//! Exports: batch results to CSV, a single result to JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets; the JSON keeps the
//! full request next to the breakdown so a calculation can be audited later.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::domain::{BuildingUse, DemandRequest, DemandResult};
use crate::error::AppError;

/// One computed batch row.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub id: String,
    pub request: DemandRequest,
    pub result: DemandResult,
}

/// A saved single-calculation file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultFile {
    pub tool: String,
    /// RFC 3339 local timestamp.
    pub generated: String,
    pub request: DemandRequest,
    pub result: DemandResult,
}

/// Write batch results to a CSV file.
pub fn write_results_csv(path: &Path, results: &[BatchResult]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(&mut file, results)
}

/// Write batch results as CSV to any writer.
pub fn write_results<W: Write>(out: &mut W, results: &[BatchResult]) -> Result<(), AppError> {
    let mut w = csv::Writer::from_writer(out);
    w.write_record([
        "id",
        "use",
        "demand_l_day",
        "base_demand_l_day",
        "temperature_factor",
        "occupancy",
        "centralization_factor",
    ])
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in results {
        let b = &r.result.breakdown;
        let use_label = match r.request.building_use {
            BuildingUse::Residential { .. } => "residential",
            BuildingUse::Tertiary { .. } => "tertiary",
        };
        w.write_record([
            r.id.clone(),
            use_label.to_string(),
            format!("{:.4}", r.result.demand_l_per_day),
            format!("{:.4}", b.base_demand_l_per_day),
            format!("{:.6}", b.temperature_factor),
            b.persons.to_string(),
            b.centralization_factor.map(|f| format!("{f:.2}")).unwrap_or_default(),
        ])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    w.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write a single result (with its request) to a JSON file.
pub fn write_result_json(path: &Path, request: &DemandRequest, result: &DemandResult) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create result JSON '{}': {e}", path.display())))?;

    let doc = ResultFile {
        tool: "acs".to_string(),
        generated: Local::now().to_rfc3339(),
        request: *request,
        result: result.clone(),
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;

    Ok(())
}

/// Read a result JSON file written by `write_result_json`.
pub fn read_result_json(path: &Path) -> Result<ResultFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open result JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid result JSON: {e}")))
}
