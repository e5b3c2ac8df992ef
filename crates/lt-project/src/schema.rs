//! Scenario schema definitions.

use crate::ProjectResult;
use lt_core::units::constants::{SOLAR_CONSTANT_W_M2, SYNODIC_MONTH_S};
use lt_core::units::{j_per_kg_k, k, kg_per_m3, m, m2, s, unitless, w_per_m_k, w_per_m2};
use lt_model::{
    AngleConversion, BottomBoundary, DepthTemperatureProfile, ModelConfig, RegolithProperties,
};
use lt_sim::SimOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub model: ModelDef,
    #[serde(default)]
    pub run: RunDef,
}

impl Scenario {
    /// Reference lunar column with default run settings.
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            version: crate::LATEST_VERSION,
            name: name.into(),
            model: ModelDef::default(),
            run: RunDef::default(),
        }
    }

    pub fn model_config(&self) -> ProjectResult<ModelConfig> {
        self.model.to_config()
    }

    pub fn sim_options(&self) -> SimOptions {
        self.run.to_options()
    }

    /// Uniform starting profile, at `initial_temperature_k` or the mean.
    pub fn initial_profile(&self, config: &ModelConfig) -> ProjectResult<DepthTemperatureProfile> {
        let t = self
            .run
            .initial_temperature_k
            .unwrap_or(config.mean_temperature_k);
        Ok(DepthTemperatureProfile::uniform(config.layer_count, t)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDef {
    #[serde(default = "default_layer_count")]
    pub layer_count: usize,
    pub layer_spacing_m: f64,
    pub conductivity_w_m_k: f64,
    pub density_kg_m3: f64,
    pub specific_heat_j_kg_k: f64,
    #[serde(default = "default_area_m2")]
    pub area_m2: f64,
    pub rf_absorption_per_m: f64,
    pub albedo: f64,
    #[serde(default = "default_solar_constant")]
    pub solar_constant_w_m2: f64,
    #[serde(default = "default_lunation_s")]
    pub lunation_s: f64,
    pub mean_temperature_k: f64,
    #[serde(default)]
    pub angle_conversion: AngleConversionDef,
    #[serde(default)]
    pub bottom_boundary: BottomBoundaryDef,
}

fn default_layer_count() -> usize {
    30
}

fn default_area_m2() -> f64 {
    1.0
}

fn default_solar_constant() -> f64 {
    SOLAR_CONSTANT_W_M2
}

fn default_lunation_s() -> f64 {
    SYNODIC_MONTH_S
}

impl Default for ModelDef {
    fn default() -> Self {
        Self {
            layer_count: default_layer_count(),
            layer_spacing_m: 0.01,
            conductivity_w_m_k: 0.0015,
            density_kg_m3: 1500.0,
            specific_heat_j_kg_k: 670.0,
            area_m2: default_area_m2(),
            rf_absorption_per_m: 1.0,
            albedo: 0.15,
            solar_constant_w_m2: default_solar_constant(),
            lunation_s: default_lunation_s(),
            mean_temperature_k: 225.0,
            angle_conversion: AngleConversionDef::default(),
            bottom_boundary: BottomBoundaryDef::default(),
        }
    }
}

impl ModelDef {
    pub fn properties(&self) -> RegolithProperties {
        RegolithProperties {
            layer_count: self.layer_count,
            layer_spacing: m(self.layer_spacing_m),
            conductivity: w_per_m_k(self.conductivity_w_m_k),
            density: kg_per_m3(self.density_kg_m3),
            specific_heat: j_per_kg_k(self.specific_heat_j_kg_k),
            area: m2(self.area_m2),
            rf_absorption_per_m: self.rf_absorption_per_m,
            albedo: unitless(self.albedo),
            solar_constant: w_per_m2(self.solar_constant_w_m2),
            lunation: s(self.lunation_s),
            mean_temperature: k(self.mean_temperature_k),
        }
    }

    pub fn to_config(&self) -> ProjectResult<ModelConfig> {
        let angle = match self.angle_conversion {
            AngleConversionDef::Reference => AngleConversion::Reference,
            AngleConversionDef::Exact => AngleConversion::Exact,
        };
        let bottom = match self.bottom_boundary {
            BottomBoundaryDef::Insulated => BottomBoundary::Insulated,
            BottomBoundaryDef::FixedTemperature { temperature_k } => {
                BottomBoundary::FixedTemperature(temperature_k)
            }
        };
        Ok(ModelConfig::from_properties(
            &self.properties(),
            angle,
            bottom,
        )?)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AngleConversionDef {
    #[default]
    Reference,
    Exact,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BottomBoundaryDef {
    #[default]
    Insulated,
    FixedTemperature {
        temperature_k: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunDef {
    pub lunations: usize,
    pub phase_increment_deg: f64,
    #[serde(default)]
    pub warmup_lunations: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_temperature_k: Option<f64>,
    #[serde(default = "default_true")]
    pub halt_on_divergence: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RunDef {
    fn default() -> Self {
        let opts = SimOptions::default();
        Self {
            lunations: opts.lunations,
            phase_increment_deg: opts.phase_increment_deg,
            warmup_lunations: opts.warmup_lunations,
            initial_temperature_k: None,
            halt_on_divergence: opts.halt_on_divergence,
        }
    }
}

impl RunDef {
    pub fn to_options(&self) -> SimOptions {
        SimOptions {
            lunations: self.lunations,
            phase_increment_deg: self.phase_increment_deg,
            warmup_lunations: self.warmup_lunations,
            halt_on_divergence: self.halt_on_divergence,
        }
    }
}
