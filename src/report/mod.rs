//! Reporting: result breakdowns, reference tables and worked examples as text.

pub mod format;

pub use format::*;
