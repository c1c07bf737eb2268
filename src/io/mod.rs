//! Input/output helpers.
//!
//! - batch CSV ingest + validation (`batch`)
//! - result exports (CSV/JSON) (`export`)

pub mod batch;
pub mod export;

pub use batch::*;
pub use export::*;
