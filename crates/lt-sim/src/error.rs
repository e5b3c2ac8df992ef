//! Error types for simulation runs.

use thiserror::Error;

/// Errors encountered while driving a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(
        "Profile diverged at lunation {lunation}, phase {phase_deg} deg: layer {layer} = {value_k} K"
    )]
    Diverged {
        lunation: usize,
        phase_deg: f64,
        layer: usize,
        value_k: f64,
    },

    #[error("Output sink error: {message}")]
    Sink { message: String },

    #[error("Model error: {0}")]
    Model(#[from] lt_model::ModelError),
}

pub type SimResult<T> = Result<T, SimError>;

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Sink {
            message: e.to_string(),
        }
    }
}
