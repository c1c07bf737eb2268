//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads environment defaults and installs logging
//! - builds requests and runs the calculator
//! - prints reports and writes optional exports

use clap::Parser;
use tracing::info;

use crate::calc::compute_demand;
use crate::cli::{BatchArgs, Cli, Command, OutputArgs, ResidentialArgs, TablesArgs, TertiaryArgs};
use crate::config::{Settings, init_tracing, load_dotenv};
use crate::domain::{BuildingKind, DemandRequest};
use crate::error::{AppError, DemandError};
use crate::tables::lookup_category;

pub mod pipeline;

/// Entry point for the `acs` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    load_dotenv();
    init_tracing();
    let settings = Settings::from_env()?;

    match cli.command {
        Command::Residential(args) => handle_residential(&args, &settings),
        Command::Tertiary(args) => handle_tertiary(&args, &settings),
        Command::Tables(args) => handle_tables(&args),
        Command::Examples => handle_examples(),
        Command::Batch(args) => handle_batch(&args, &settings),
    }
}

fn handle_residential(args: &ResidentialArgs, settings: &Settings) -> Result<(), AppError> {
    let request = residential_request(args, settings)?;
    compute_and_print(&request, &args.output)
}

fn handle_tertiary(args: &TertiaryArgs, settings: &Settings) -> Result<(), AppError> {
    let request = tertiary_request(args, settings)?;
    compute_and_print(&request, &args.output)
}

fn compute_and_print(request: &DemandRequest, output: &OutputArgs) -> Result<(), AppError> {
    let result = compute_demand(request)?;
    if !result.demand_l_per_day.is_finite() {
        return Err(AppError::new(4, "Non-finite demand computed."));
    }

    if output.json {
        let text = serde_json::to_string_pretty(&result)
            .map_err(|e| AppError::new(4, format!("Failed to serialize result: {e}")))?;
        println!("{text}");
    } else {
        println!("{}", crate::report::format_result(request, &result));
    }

    if let Some(path) = &output.export {
        crate::io::export::write_result_json(path, request, &result)?;
        info!(path = %path.display(), "result exported");
    }

    Ok(())
}

fn handle_tables(args: &TablesArgs) -> Result<(), AppError> {
    if args.csv {
        print!("{}", crate::report::format_tables_csv()?);
    } else if args.json {
        println!("{}", crate::report::format_tables_json()?);
    } else {
        println!("{}", crate::report::format_tables());
    }
    Ok(())
}

fn handle_examples() -> Result<(), AppError> {
    println!("{}", crate::report::format_examples()?);
    Ok(())
}

fn handle_batch(args: &BatchArgs, settings: &Settings) -> Result<(), AppError> {
    let input = crate::io::batch::load_requests(&args.input, settings.default_service_temperature_c)?;
    let out = pipeline::run_batch(input);

    match &args.output {
        Some(path) => crate::io::export::write_results_csv(path, &out.results)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            crate::io::export::write_results(&mut stdout, &out.results)?;
        }
    }

    for err in &out.row_errors {
        eprintln!(
            "line {}{}: {}",
            err.line,
            err.id.as_deref().map(|id| format!(" ({id})")).unwrap_or_default(),
            err.message
        );
    }
    eprintln!(
        "Rows: read={} computed={} rejected={}",
        out.rows_read,
        out.results.len(),
        out.row_errors.len()
    );

    batch_status(&out)
}

/// A batch where rows were rejected and none computed is an input error.
fn batch_status(out: &pipeline::BatchOutput) -> Result<(), AppError> {
    if out.results.is_empty() && !out.row_errors.is_empty() {
        return Err(AppError::new(
            2,
            format!("No rows computed; all {} rows were rejected.", out.row_errors.len()),
        ));
    }
    Ok(())
}

/// Build a residential request from flags.
///
/// `--dwellings` implies a collective building; `--building collective` without
/// it, or `--building single` with it, is rejected.
pub fn residential_request(args: &ResidentialArgs, settings: &Settings) -> Result<DemandRequest, AppError> {
    let t = service_temperature(&args.output, settings);
    let kind = args.building.unwrap_or(if args.dwellings.is_some() {
        BuildingKind::Collective
    } else {
        BuildingKind::Single
    });

    let request = match (kind, args.dwellings) {
        (BuildingKind::Single, None) => DemandRequest::single_dwelling(args.bedrooms, t),
        (BuildingKind::Collective, Some(dwellings)) => DemandRequest::collective(args.bedrooms, dwellings, t),
        (BuildingKind::Collective, None) => {
            return Err(DemandError::invalid("a collective building needs --dwellings").into());
        }
        (BuildingKind::Single, Some(_)) => {
            return Err(DemandError::invalid("--dwellings only applies to collective buildings").into());
        }
    };
    Ok(request)
}

/// Build a tertiary request from flags, resolving the category name.
pub fn tertiary_request(args: &TertiaryArgs, settings: &Settings) -> Result<DemandRequest, AppError> {
    let category = lookup_category(&args.category)?;
    Ok(DemandRequest::tertiary(
        category,
        args.occupants,
        service_temperature(&args.output, settings),
    ))
}

fn service_temperature(output: &OutputArgs, settings: &Settings) -> f64 {
    output
        .temperature
        .map(f64::from)
        .unwrap_or(settings.default_service_temperature_c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TertiaryUse;

    fn output(temperature: Option<u32>) -> OutputArgs {
        OutputArgs {
            temperature,
            json: false,
            export: None,
        }
    }

    fn residential(building: Option<BuildingKind>, dwellings: Option<u32>) -> ResidentialArgs {
        ResidentialArgs {
            bedrooms: 4,
            building,
            dwellings,
            output: output(None),
        }
    }

    #[test]
    fn dwellings_flag_implies_collective() {
        let req = residential_request(&residential(None, Some(10)), &Settings::default()).unwrap();
        assert_eq!(req, DemandRequest::collective(4, 10, 60.0));

        let req = residential_request(&residential(None, None), &Settings::default()).unwrap();
        assert_eq!(req, DemandRequest::single_dwelling(4, 60.0));
    }

    #[test]
    fn collective_without_dwellings_rejected() {
        let err = residential_request(&residential(Some(BuildingKind::Collective), None), &Settings::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("--dwellings"));

        assert!(residential_request(&residential(Some(BuildingKind::Single), Some(3)), &Settings::default()).is_err());
    }

    #[test]
    fn temperature_flag_overrides_settings() {
        let settings = Settings {
            default_service_temperature_c: 50.0,
        };
        let args = TertiaryArgs {
            category: "Offices".to_string(),
            occupants: 10,
            output: output(None),
        };
        let req = tertiary_request(&args, &settings).unwrap();
        assert_eq!(req, DemandRequest::tertiary(TertiaryUse::Offices, 10, 50.0));

        let args = TertiaryArgs {
            output: output(Some(45)),
            ..args
        };
        assert_eq!(tertiary_request(&args, &settings).unwrap().service_temperature_c, 45.0);
    }

    #[test]
    fn singular_category_flag_accepted() {
        let args = TertiaryArgs {
            category: "Office".to_string(),
            occupants: 10,
            output: output(Some(45)),
        };
        let req = tertiary_request(&args, &Settings::default()).unwrap();
        assert_eq!(req, DemandRequest::tertiary(TertiaryUse::Offices, 10, 45.0));
        assert!((compute_demand(&req).unwrap().demand_l_per_day - 30.0).abs() < 1e-9);
    }

    #[test]
    fn batch_with_every_row_rejected_fails() {
        let csv = "id,use,bedrooms,building,dwellings,category,occupants,temperature_c\n\
                   zero,tertiary,,,,offices,0,\n\
                   cold,residential,2,single,,,,15\n";
        let out = pipeline::run_batch(crate::io::read_requests(csv.as_bytes(), 60.0).unwrap());
        let err = batch_status(&out).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("all 2 rows were rejected"));

        let partial = "id,use,bedrooms,building,dwellings,category,occupants,temperature_c\n\
                       ok,residential,2,single,,,,\n\
                       zero,tertiary,,,,offices,0,\n";
        let out = pipeline::run_batch(crate::io::read_requests(partial.as_bytes(), 60.0).unwrap());
        assert!(batch_status(&out).is_ok());

        let empty = "id,use,bedrooms,building,dwellings,category,occupants,temperature_c\n";
        let out = pipeline::run_batch(crate::io::read_requests(empty.as_bytes(), 60.0).unwrap());
        assert!(batch_status(&out).is_ok());
    }

    #[test]
    fn unknown_category_flag_rejected() {
        let args = TertiaryArgs {
            category: "Sauna".to_string(),
            occupants: 1,
            output: output(None),
        };
        let err = tertiary_request(&args, &Settings::default()).unwrap_err();
        assert!(err.to_string().contains("Unknown tertiary-use category 'Sauna'"));
    }
}
