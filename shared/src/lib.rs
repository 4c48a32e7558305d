//! Iron Progress Shared Library
//!
//! Domain models, store input types and the pure calculations (macro
//! arithmetic, training volume, calendar bucketing, unit conversion) used by
//! the store crate and the WASM module.

pub mod calendar;
pub mod catalog;
pub mod errors;
pub mod models;
pub mod nutrition;
pub mod training;
pub mod types;
pub mod units;

// Re-export commonly used items
pub use calendar::{DateRange, WeekStart};
pub use errors::*;
pub use models::*;
pub use nutrition::*;
pub use types::*;
pub use units::*;
