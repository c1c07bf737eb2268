//! `acs-demand` library crate.
//!
//! Daily domestic hot water (DHW) demand of a building from regulatory
//! reference tables: occupancy by bedrooms, centralization by dwellings,
//! per-person consumption by tertiary use, and a service temperature correction.
//!
//! The binary (`acs`) is a thin wrapper around this library so that:
//!
//! - the calculator is testable without spawning processes
//! - other front-ends can call `calc::compute_demand` directly

pub mod app;
pub mod calc;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod tables;
