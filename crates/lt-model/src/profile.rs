//! Fixed-length depth temperature profile.

use crate::config::ModelConfig;
use crate::error::{ModelError, ModelResult};
use lt_core::{ensure_finite, ensure_positive};

/// Layer temperatures in Kelvin; index 0 is the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthTemperatureProfile {
    layers_k: Vec<f64>,
}

impl DepthTemperatureProfile {
    /// Uniform column at `temperature_k`.
    pub fn uniform(layer_count: usize, temperature_k: f64) -> ModelResult<Self> {
        if layer_count == 0 {
            return Err(ModelError::InvalidConfig {
                what: "profile needs at least one layer",
            });
        }
        let t = ensure_positive(temperature_k, "initial temperature")?;
        Ok(Self {
            layers_k: vec![t; layer_count],
        })
    }

    /// Uniform column sized for `config`, at its mean temperature.
    pub fn initial(config: &ModelConfig) -> Self {
        Self {
            layers_k: vec![config.mean_temperature_k; config.layer_count],
        }
    }

    /// Profile from explicit layer values; every value must be finite.
    pub fn from_values(values: Vec<f64>) -> ModelResult<Self> {
        if values.is_empty() {
            return Err(ModelError::InvalidConfig {
                what: "profile needs at least one layer",
            });
        }
        for &v in &values {
            ensure_finite(v, "layer temperature")?;
        }
        Ok(Self { layers_k: values })
    }

    /// Check the layer count against a model before stepping.
    pub fn check_layout(&self, config: &ModelConfig) -> ModelResult<()> {
        if self.len() != config.layer_count {
            return Err(ModelError::LayerCount {
                expected: config.layer_count,
                actual: self.len(),
            });
        }
        Ok(())
    }

    /// Wrap values produced by the stepper; they are not re-validated.
    pub(crate) fn from_stepped(layers_k: Vec<f64>) -> Self {
        Self { layers_k }
    }

    pub fn len(&self) -> usize {
        self.layers_k.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers_k.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.layers_k
    }

    pub fn surface_k(&self) -> f64 {
        self.layers_k[0]
    }

    pub fn deepest_k(&self) -> f64 {
        self.layers_k[self.layers_k.len() - 1]
    }

    /// First layer that is non-finite or at/below absolute zero.
    pub fn first_non_physical(&self) -> Option<(usize, f64)> {
        self.layers_k
            .iter()
            .copied()
            .enumerate()
            .find(|&(_, t)| !t.is_finite() || t <= 0.0)
    }

    /// Largest absolute layer-wise difference to another profile.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.layers_k
            .iter()
            .zip(&other.layers_k)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}
