//! Error types for model construction.

use thiserror::Error;

/// Errors raised while building a model configuration or profile.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid model configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Profile has {actual} layers, model expects {expected}")]
    LayerCount { expected: usize, actual: usize },

    #[error(transparent)]
    Core(#[from] lt_core::CoreError),
}

pub type ModelResult<T> = Result<T, ModelError>;
