//! Static reference tables.
//!
//! - occupancy by bedroom count (`occupancy`)
//! - centralization factor by dwelling count (`centralization`)
//! - reference consumption by tertiary use (`tertiary`)
//!
//! Tables are `const` data: read-only for the life of the process and safe to
//! share between threads without synchronization.

pub mod centralization;
pub mod occupancy;
pub mod tertiary;

pub use centralization::*;
pub use occupancy::*;
pub use tertiary::*;
