//! Domain types used throughout the calculator.
//!
//! This module defines:
//!
//! - request variants (`DemandRequest`, `BuildingUse`, `ResidentialBuilding`)
//! - the closed tertiary-use enumeration (`TertiaryUse`)
//! - calculation outputs (`DemandResult`, `DemandBreakdown`)
//! - the regulatory constants (28 L/day·person, 60 °C, 15 °C)

pub mod types;

pub use types::*;
