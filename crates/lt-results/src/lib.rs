//! lt-results: output sinks and run storage.

pub mod csv;
pub mod hash;
pub mod memory;
pub mod store;
pub mod types;

pub use csv::{CsvSink, format_row, header_row, truncate_tenths};
pub use hash::compute_run_id;
pub use memory::{MemorySink, OwnedRecord};
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Malformed row {line}: {message}")]
    MalformedRow { line: usize, message: String },
}
