//! lt-core: stable foundation for lunatherm.
//!
//! Contains:
//! - units (uom SI types + constructors + physical constants)
//! - numeric (Real + tolerances + float helpers)
//! - timing (wall-clock timers for run summaries)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
