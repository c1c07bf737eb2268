//! The demand calculator.
//!
//! Stateless: every call reads only its request and the `const` reference tables.

pub mod demand;

pub use demand::*;
