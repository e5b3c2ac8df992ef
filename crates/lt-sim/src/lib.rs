//! Driver for the regolith thermal model.
//!
//! Provides:
//! - Lunation/phase schedule with drift-free phase grid
//! - Run loop threading the profile through the stepper
//! - Output sink interface for retained steps
//! - Divergence guard and per-lunation convergence summaries

pub mod error;
pub mod schedule;
pub mod sim;
pub mod sink;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use schedule::{PhaseIter, PhasePoint, PhaseSchedule};
pub use sim::{
    LunationSummary, RunReport, SimOptions, SimProgress, SimulationState, run_sim,
    run_sim_with_progress,
};
pub use sink::{NullSink, OutputSink, ReportedRecord};
