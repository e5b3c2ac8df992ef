//! Forward-Euler thermal stepper.
//!
//! Each layer exchanges heat with its neighbors through the conductance
//! `beta`; the surface layer also absorbs sunlight and radiates as a black
//! body. Net heat flow (W) is turned into a temperature change through the
//! layer heat capacity `gamma`:
//!
//! ```text
//! T0' = T0 + [A (I - sigma T0^4) + beta (T1 - T0)] dt / gamma
//! Ti' = Ti + [beta (Ti+1 - Ti) + beta (Ti-1 - Ti)] dt / gamma
//! ```
//!
//! The neighbor below the deepest layer comes from [`BottomBoundary`].
//! All updates read the pre-step profile.
//!
//! [`BottomBoundary`]: crate::config::BottomBoundary

use crate::brightness::brightness_temperature;
use crate::config::ModelConfig;
use crate::insolation::absorbed_flux_w_m2;
use crate::profile::DepthTemperatureProfile;

/// Result of one step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutput {
    pub profile: DepthTemperatureProfile,
    /// Brightness temperature of `profile`, K
    pub brightness_k: f64,
}

/// Pure transition function over depth temperature profiles.
#[derive(Clone, Debug)]
pub struct ThermalStepper {
    config: ModelConfig,
}

impl ThermalStepper {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Advance `profile` by the time covered by `phase_increment_deg`,
    /// with the sun at `phase_deg`.
    ///
    /// # Panics
    ///
    /// If `profile` does not have the configured layer count, or has no
    /// layers at all. Use
    /// [`DepthTemperatureProfile::check_layout`] at the boundary.
    pub fn step(
        &self,
        profile: &DepthTemperatureProfile,
        phase_deg: f64,
        phase_increment_deg: f64,
    ) -> StepOutput {
        let cfg = &self.config;
        assert_eq!(
            profile.len(),
            cfg.layer_count,
            "profile layer count does not match the model"
        );
        assert!(!profile.is_empty(), "profile has no layers");

        let dt = cfg.time_step_s(phase_increment_deg);
        let insolation = absorbed_flux_w_m2(cfg, phase_deg);
        let heat = self.net_heat_flow_w(profile.as_slice(), insolation);

        let gain = dt / cfg.gamma_j_per_k;
        let next: Vec<f64> = profile
            .as_slice()
            .iter()
            .zip(&heat)
            .map(|(t, q)| t + q * gain)
            .collect();

        let brightness_k = brightness_temperature(&next, cfg.alpha, cfg.mean_temperature_k);
        StepOutput {
            profile: DepthTemperatureProfile::from_stepped(next),
            brightness_k,
        }
    }

    /// Net heat flow into each layer (W) for the given absorbed flux.
    pub(crate) fn net_heat_flow_w(&self, t: &[f64], insolation_w_m2: f64) -> Vec<f64> {
        let cfg = &self.config;
        let beta = cfg.beta_w_per_k;
        let n = t.len();
        let below = |i: usize| {
            if i + 1 < n {
                t[i + 1]
            } else {
                cfg.below_bottom_k(t[n - 1])
            }
        };

        let mut heat = Vec::with_capacity(n);

        let t0 = t[0];
        let radiative =
            cfg.radiating_area_m2 * (insolation_w_m2 - cfg.stefan_boltzmann * t0.powi(4));
        heat.push(radiative + (below(0) - t0) * beta);

        for i in 1..n {
            heat.push((below(i) - t[i]) * beta + (t[i - 1] - t[i]) * beta);
        }
        heat
    }
}
