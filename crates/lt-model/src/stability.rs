//! Step-size limits of the explicit scheme.
//!
//! Forward Euler stays non-oscillatory while each layer's update
//! coefficient stays below one:
//!
//! - interior diffusion: `2 beta dt / gamma <= 1`
//! - surface: `(beta + 4 A sigma T_eq^3) dt / gamma <= 1`, linearising
//!   black-body emission around the subsolar equilibrium temperature.
//!
//! The stepper never enforces these; callers decide what to do.

use crate::config::ModelConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StabilityReport {
    /// Step under test, s
    pub dt_s: f64,
    /// Largest stable step for interior conduction, s
    pub conduction_limit_s: f64,
    /// Largest stable step for the radiating surface layer, s
    pub surface_limit_s: f64,
    /// Radiative equilibrium at the subsolar point, K
    pub equilibrium_temperature_k: f64,
}

impl StabilityReport {
    /// Analyse the step produced by `phase_increment_deg`.
    pub fn for_phase_increment(config: &ModelConfig, phase_increment_deg: f64) -> Self {
        let beta = config.beta_w_per_k;
        let gamma = config.gamma_j_per_k;

        let absorbed = (1.0 - config.albedo) * config.solar_constant_w_m2;
        let t_eq = if config.stefan_boltzmann > 0.0 {
            (absorbed / config.stefan_boltzmann)
                .powf(0.25)
                .max(config.mean_temperature_k)
        } else {
            config.mean_temperature_k
        };
        let radiative_conductance =
            4.0 * config.radiating_area_m2 * config.stefan_boltzmann * t_eq.powi(3);

        Self {
            dt_s: config.time_step_s(phase_increment_deg),
            conduction_limit_s: gamma / (2.0 * beta),
            surface_limit_s: gamma / (beta + radiative_conductance),
            equilibrium_temperature_k: t_eq,
        }
    }

    /// Smallest of the two limits.
    pub fn limit_s(&self) -> f64 {
        self.conduction_limit_s.min(self.surface_limit_s)
    }

    pub fn is_stable(&self) -> bool {
        self.dt_s <= self.limit_s()
    }

    /// `dt / limit`; above one the scheme is expected to oscillate.
    pub fn margin(&self) -> f64 {
        self.dt_s / self.limit_s()
    }
}
