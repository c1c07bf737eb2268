//! Command-line parsing for the DHW demand calculator.
//!
//! Argument parsing and command dispatch stay separate from the calculator:
//! this module only describes flags; `app` turns them into requests.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{BuildingKind, SERVICE_TEMPERATURE_MAX_C, SERVICE_TEMPERATURE_MIN_C};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "acs", version, about = "Daily domestic hot water (DHW) demand calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Demand of a single-family dwelling or a building of dwellings.
    Residential(ResidentialArgs),
    /// Demand of a non-residential use (hospital, hotel, office, ...).
    Tertiary(TertiaryArgs),
    /// Print the reference tables.
    Tables(TablesArgs),
    /// Print worked examples.
    Examples,
    /// Compute every request in a CSV file.
    Batch(BatchArgs),
}

/// Options shared by the single-calculation commands.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Service temperature in °C (defaults to ACS_SERVICE_TEMPERATURE_C, else 60).
    #[arg(
        short = 't',
        long,
        value_parser = clap::value_parser!(u32).range(SERVICE_TEMPERATURE_MIN_C as i64..=SERVICE_TEMPERATURE_MAX_C as i64)
    )]
    pub temperature: Option<u32>,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Save request and result to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ResidentialArgs {
    /// Bedrooms per dwelling.
    #[arg(short = 'b', long)]
    pub bedrooms: u32,

    /// Building kind. Inferred as `collective` when --dwellings is given.
    #[arg(long, value_enum)]
    pub building: Option<BuildingKind>,

    /// Number of dwellings sharing the DHW system (collective buildings only).
    #[arg(short = 'd', long)]
    pub dwellings: Option<u32>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct TertiaryArgs {
    /// Use category, by id (`offices`) or table label ("Hospitals and clinics").
    #[arg(short = 'c', long)]
    pub category: String,

    /// Number of persons/users.
    #[arg(short = 'n', long)]
    pub occupants: u32,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct TablesArgs {
    /// Print CSV instead of aligned text.
    #[arg(long, conflicts_with = "json")]
    pub csv: bool,

    /// Print JSON instead of aligned text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// Requests CSV (`id,use,bedrooms,building,dwellings,category,occupants,temperature_c`).
    #[arg(short = 'i', long, value_name = "CSV")]
    pub input: PathBuf,

    /// Write results to this CSV instead of stdout.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_collective_residential() {
        let cli = Cli::try_parse_from(["acs", "residential", "-b", "4", "--dwellings", "10", "-t", "45"]).unwrap();
        match cli.command {
            Command::Residential(args) => {
                assert_eq!(args.bedrooms, 4);
                assert_eq!(args.dwellings, Some(10));
                assert_eq!(args.building, None);
                assert_eq!(args.output.temperature, Some(45));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn temperature_outside_form_range_rejected() {
        assert!(Cli::try_parse_from(["acs", "residential", "-b", "2", "-t", "15"]).is_err());
        assert!(Cli::try_parse_from(["acs", "residential", "-b", "2", "-t", "91"]).is_err());
        assert!(Cli::try_parse_from(["acs", "residential", "-b", "2", "-t", "30"]).is_ok());
    }

    #[test]
    fn parses_tertiary_label_with_spaces() {
        let cli = Cli::try_parse_from(["acs", "tertiary", "-c", "Hospitals and clinics", "-n", "3"]).unwrap();
        match cli.command {
            Command::Tertiary(args) => {
                assert_eq!(args.category, "Hospitals and clinics");
                assert_eq!(args.occupants, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
