//! Formatted terminal output: result breakdowns, reference tables, worked examples.
//!
//! Formatting lives in one place so the calculator stays free of presentation
//! concerns and output changes stay localized.

use serde::Serialize;

use crate::calc::compute_demand;
use crate::domain::{
    BuildingUse, COLD_WATER_TEMPERATURE_C, DemandRequest, DemandResult, REFERENCE_TEMPERATURE_C,
    RESIDENTIAL_REFERENCE_L_PER_PERSON, ResidentialBuilding,
};
use crate::error::AppError;
use crate::tables::{
    CENTRALIZATION_TABLE, CentralizationBand, OCCUPANCY_TABLE, OccupancyRow, TERTIARY_TABLE, TertiaryRow, band_labels,
};

/// Format the demand line followed by the calculation details.
pub fn format_result(request: &DemandRequest, result: &DemandResult) -> String {
    let b = &result.breakdown;
    let mut out = String::new();

    out.push_str(&format!("Daily DHW demand: {:.2} L/day\n", result.demand_l_per_day));
    out.push_str("\nCalculation details:\n");

    match request.building_use {
        BuildingUse::Residential { bedrooms, building } => {
            out.push_str(&format!("- Dwelling with {bedrooms} bedroom(s): {} persons\n", fmt_num(b.persons)));
            out.push_str(&format!(
                "- Reference demand: {} L/day per person at {} °C\n",
                fmt_num(RESIDENTIAL_REFERENCE_L_PER_PERSON),
                fmt_num(REFERENCE_TEMPERATURE_C)
            ));
            match building {
                ResidentialBuilding::SingleDwelling => {
                    out.push_str(&format!(
                        "- Base: {} persons × {} L/day = {} L/day\n",
                        fmt_num(b.persons),
                        fmt_num(b.reference_l_per_person),
                        fmt_num(b.base_demand_l_per_day)
                    ));
                }
                ResidentialBuilding::Collective { dwellings } => {
                    let factor = b.centralization_factor.unwrap_or(1.0);
                    out.push_str(&format!("- Dwellings: {dwellings}\n"));
                    out.push_str(&format!("- Centralization factor: {}\n", fmt_num(factor)));
                    out.push_str(&format!(
                        "- Base: {} persons × {} L/day × {dwellings} dwellings × {} = {} L/day\n",
                        fmt_num(b.persons),
                        fmt_num(b.reference_l_per_person),
                        fmt_num(factor),
                        fmt_num(b.base_demand_l_per_day)
                    ));
                }
            }
        }
        BuildingUse::Tertiary { category, occupants } => {
            out.push_str(&format!("- Use: {}\n", category.label()));
            out.push_str(&format!(
                "- Reference demand: {} L/day per person at {} °C\n",
                fmt_num(b.reference_l_per_person),
                fmt_num(REFERENCE_TEMPERATURE_C)
            ));
            out.push_str(&format!("- Occupants: {occupants}\n"));
            out.push_str(&format!(
                "- Base: {occupants} persons × {} L/day = {} L/day\n",
                fmt_num(b.reference_l_per_person),
                fmt_num(b.base_demand_l_per_day)
            ));
        }
    }

    if b.service_temperature_c != REFERENCE_TEMPERATURE_C {
        out.push_str(&format!(
            "- Service temperature adjustment ({} °C): × {:.4}\n",
            fmt_num(b.service_temperature_c),
            b.temperature_factor
        ));
    }

    out
}

/// Format the three reference tables as aligned text.
pub fn format_tables() -> String {
    let mut out = String::new();

    out.push_str("Table A: minimum occupancy by number of bedrooms\n");
    out.push_str(&format!("{:<10} {:>8}\n", "bedrooms", "persons"));
    out.push_str(&format!("{:-<10} {:-<8}\n", "", ""));
    for row in &OCCUPANCY_TABLE {
        out.push_str(&format!("{:<10} {:>8}\n", row.bedrooms_label(), fmt_num(row.persons)));
    }

    out.push_str("\nTable B: centralization factor by number of dwellings\n");
    out.push_str(&format!("{:<10} {:>8}\n", "dwellings", "factor"));
    out.push_str(&format!("{:-<10} {:-<8}\n", "", ""));
    for (label, band) in band_labels().iter().zip(CENTRALIZATION_TABLE.iter()) {
        out.push_str(&format!("{:<10} {:>8.2}\n", label, band.factor));
    }

    out.push_str("\nTable C: reference consumption for tertiary uses (L/day·person at 60 °C)\n");
    out.push_str(&format!("{:<36} {:>8}  {}\n", "use", "L/day", "id"));
    out.push_str(&format!("{:-<36} {:-<8}  {:-<10}\n", "", "", ""));
    for row in &TERTIARY_TABLE {
        out.push_str(&format!(
            "{:<36} {:>8}  {}\n",
            row.category.label(),
            fmt_num(row.l_per_person),
            row.category.slug()
        ));
    }

    out
}

/// Format the reference tables as CSV (one section per table, blank line between).
pub fn format_tables_csv() -> Result<String, AppError> {
    let mut sections = Vec::with_capacity(3);

    let mut w = csv::Writer::from_writer(Vec::new());
    w.write_record(["bedrooms", "persons"]).map_err(csv_err)?;
    for row in &OCCUPANCY_TABLE {
        w.write_record([row.bedrooms_label(), fmt_num(row.persons)]).map_err(csv_err)?;
    }
    sections.push(finish_csv(w)?);

    let mut w = csv::Writer::from_writer(Vec::new());
    w.write_record(["dwellings", "factor"]).map_err(csv_err)?;
    for (label, band) in band_labels().into_iter().zip(CENTRALIZATION_TABLE.iter()) {
        w.write_record([label, format!("{:.2}", band.factor)]).map_err(csv_err)?;
    }
    sections.push(finish_csv(w)?);

    let mut w = csv::Writer::from_writer(Vec::new());
    w.write_record(["id", "use", "l_per_person_day"]).map_err(csv_err)?;
    for row in &TERTIARY_TABLE {
        w.write_record([row.category.slug(), row.category.label().to_string(), fmt_num(row.l_per_person)])
            .map_err(csv_err)?;
    }
    sections.push(finish_csv(w)?);

    Ok(sections.join("\n"))
}

#[derive(Serialize)]
struct CentralizationEntry {
    dwellings: String,
    #[serde(flatten)]
    band: CentralizationBand,
}

#[derive(Serialize)]
struct ReferenceTables<'a> {
    occupancy: &'a [OccupancyRow],
    centralization: Vec<CentralizationEntry>,
    tertiary: &'a [TertiaryRow],
}

/// Format the reference tables as a single JSON document.
pub fn format_tables_json() -> Result<String, AppError> {
    let tables = ReferenceTables {
        occupancy: &OCCUPANCY_TABLE,
        centralization: band_labels()
            .into_iter()
            .zip(CENTRALIZATION_TABLE)
            .map(|(dwellings, band)| CentralizationEntry { dwellings, band })
            .collect(),
        tertiary: &TERTIARY_TABLE,
    };
    serde_json::to_string_pretty(&tables).map_err(|e| AppError::new(4, format!("Failed to serialize tables: {e}")))
}

/// Worked examples, each computed through the calculator.
pub fn format_examples() -> Result<String, AppError> {
    let examples = [
        ("Example 1: single-family dwelling with 2 bedrooms", DemandRequest::single_dwelling(2, REFERENCE_TEMPERATURE_C)),
        (
            "Example 2: building of 10 dwellings with 4 bedrooms each",
            DemandRequest::collective(4, 10, REFERENCE_TEMPERATURE_C),
        ),
    ];

    let mut out = String::new();
    for (title, request) in examples {
        let result = compute_demand(&request)?;
        out.push_str(&format!("{title}\n"));
        out.push_str(&format_result(&request, &result));
        out.push('\n');
    }
    out.push_str(&format_notes());
    Ok(out)
}

/// Footer notes on the reference values and the temperature correction.
pub fn format_notes() -> String {
    format!(
        "Notes:\n\
         - Residential reference demand is {} L/day per person at {} °C.\n\
         - At other service temperatures the demand is multiplied by ({} - {}) / (T - {}).\n",
        fmt_num(RESIDENTIAL_REFERENCE_L_PER_PERSON),
        fmt_num(REFERENCE_TEMPERATURE_C),
        fmt_num(REFERENCE_TEMPERATURE_C),
        fmt_num(COLD_WATER_TEMPERATURE_C),
        fmt_num(COLD_WATER_TEMPERATURE_C),
    )
}

/// Print integral values without decimals, others with up to 2.
fn fmt_num(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{v:.0}")
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn csv_err(e: csv::Error) -> AppError {
    AppError::new(4, format!("Failed to format CSV: {e}"))
}

fn finish_csv(w: csv::Writer<Vec<u8>>) -> Result<String, AppError> {
    let bytes = w
        .into_inner()
        .map_err(|e| AppError::new(4, format!("Failed to flush CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::new(4, format!("CSV output is not UTF-8: {e}")))
}
