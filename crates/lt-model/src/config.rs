//! Immutable model configuration.
//!
//! Physical inputs are given as SI quantities in [`RegolithProperties`];
//! [`ModelConfig::from_properties`] derives the per-layer coefficients the
//! stepper uses:
//!
//! - conductance between adjacent layers `beta = k * A / dz` (W/K)
//! - heat capacity of one layer `gamma = rho * c * A * dz` (J/K)
//! - per-layer microwave transmission `alpha = exp(-kappa_rf * dz)`

use crate::error::{ModelError, ModelResult};
use lt_core::units::constants::{
    REFERENCE_DEG_PER_RAD, SOLAR_CONSTANT_W_M2, STEFAN_BOLTZMANN_W_M2_K4, SYNODIC_MONTH_S,
};
use lt_core::units::{
    Area, Conductivity, Density, HeatFlux, Length, Ratio, SpecificHeat, Temperature, Time,
};
use lt_core::{ensure_in_range, ensure_positive};
use uom::si::area::square_meter;
use uom::si::heat_flux_density::watt_per_square_meter;
use uom::si::length::meter;
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::ratio::ratio;
use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
use uom::si::thermal_conductivity::watt_per_meter_kelvin;
use uom::si::thermodynamic_temperature::kelvin;
use uom::si::time::second;

/// Treatment of the face below the deepest modeled layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BottomBoundary {
    /// Zero heat flux: the missing neighbor mirrors the deepest layer.
    #[default]
    Insulated,
    /// The missing neighbor is held at a constant temperature (K).
    FixedTemperature(f64),
}

/// Degrees to radians conversion used for the zenith angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AngleConversion {
    /// Divide by 57.29, matching the reference model output.
    #[default]
    Reference,
    /// Divide by 180/pi.
    Exact,
}

impl AngleConversion {
    pub fn degrees_per_radian(self) -> f64 {
        match self {
            AngleConversion::Reference => REFERENCE_DEG_PER_RAD,
            AngleConversion::Exact => 180.0 / std::f64::consts::PI,
        }
    }
}

/// Physical description of the regolith column and its forcing.
#[derive(Clone, Debug)]
pub struct RegolithProperties {
    /// Number of modeled layers
    pub layer_count: usize,
    /// Thickness of one layer
    pub layer_spacing: Length,
    /// Bulk thermal conductivity
    pub conductivity: Conductivity,
    /// Bulk density
    pub density: Density,
    /// Specific heat capacity
    pub specific_heat: SpecificHeat,
    /// Cross-section shared by all layers (also the radiating area)
    pub area: Area,
    /// Microwave absorption coefficient (1/m)
    pub rf_absorption_per_m: f64,
    /// Bond albedo
    pub albedo: Ratio,
    /// Solar irradiance at normal incidence
    pub solar_constant: HeatFlux,
    /// Duration of one full solar day ("lunation")
    pub lunation: Time,
    /// Mean temperature: initial column temperature and brightness seed
    pub mean_temperature: Temperature,
}

impl RegolithProperties {
    /// Lunar regolith column used as the reference configuration.
    pub fn lunar_reference() -> Self {
        use lt_core::units::*;
        Self {
            layer_count: 30,
            layer_spacing: m(0.01),
            conductivity: w_per_m_k(0.0015),
            density: kg_per_m3(1500.0),
            specific_heat: j_per_kg_k(670.0),
            area: m2(1.0),
            rf_absorption_per_m: 1.0,
            albedo: unitless(0.15),
            solar_constant: w_per_m2(SOLAR_CONSTANT_W_M2),
            lunation: s(SYNODIC_MONTH_S),
            mean_temperature: k(225.0),
        }
    }
}

/// Constants consumed by the thermal stepper. Built once, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
    pub layer_count: usize,
    /// W/m²/K⁴
    pub stefan_boltzmann: f64,
    /// m²
    pub radiating_area_m2: f64,
    /// Inter-layer conductance, W/K
    pub beta_w_per_k: f64,
    /// Layer heat capacity, J/K
    pub gamma_j_per_k: f64,
    /// 1/m
    pub rf_absorption_per_m: f64,
    /// Per-layer transmission in (0, 1]
    pub alpha: f64,
    pub albedo: f64,
    /// W/m²
    pub solar_constant_w_m2: f64,
    /// m
    pub layer_spacing_m: f64,
    /// s
    pub lunation_s: f64,
    /// K
    pub mean_temperature_k: f64,
    pub angle_conversion: AngleConversion,
    pub bottom: BottomBoundary,
}

impl ModelConfig {
    /// Derive the model constants from physical properties.
    pub fn from_properties(
        props: &RegolithProperties,
        angle_conversion: AngleConversion,
        bottom: BottomBoundary,
    ) -> ModelResult<Self> {
        if props.layer_count < 2 {
            return Err(ModelError::InvalidConfig {
                what: "layer_count must be at least 2",
            });
        }

        let dz = ensure_positive(props.layer_spacing.get::<meter>(), "layer_spacing")?;
        let conductivity = ensure_positive(
            props.conductivity.get::<watt_per_meter_kelvin>(),
            "conductivity",
        )?;
        let density = ensure_positive(props.density.get::<kilogram_per_cubic_meter>(), "density")?;
        let specific_heat = ensure_positive(
            props.specific_heat.get::<joule_per_kilogram_kelvin>(),
            "specific_heat",
        )?;
        let area = ensure_positive(props.area.get::<square_meter>(), "area")?;
        let rf_absorption = ensure_in_range(
            props.rf_absorption_per_m,
            0.0,
            f64::MAX,
            "rf_absorption_per_m",
        )?;
        let albedo = ensure_in_range(props.albedo.get::<ratio>(), 0.0, 1.0, "albedo")?;
        let solar_constant = ensure_in_range(
            props.solar_constant.get::<watt_per_square_meter>(),
            0.0,
            f64::MAX,
            "solar_constant",
        )?;
        let lunation_s = ensure_positive(props.lunation.get::<second>(), "lunation")?;
        let mean_temperature_k =
            ensure_positive(props.mean_temperature.get::<kelvin>(), "mean_temperature")?;

        if let BottomBoundary::FixedTemperature(t) = bottom {
            ensure_positive(t, "bottom boundary temperature")?;
        }

        Ok(Self {
            layer_count: props.layer_count,
            stefan_boltzmann: STEFAN_BOLTZMANN_W_M2_K4,
            radiating_area_m2: area,
            beta_w_per_k: conductivity * area / dz,
            gamma_j_per_k: density * specific_heat * area * dz,
            rf_absorption_per_m: rf_absorption,
            alpha: (-rf_absorption * dz).exp(),
            albedo,
            solar_constant_w_m2: solar_constant,
            layer_spacing_m: dz,
            lunation_s,
            mean_temperature_k,
            angle_conversion,
            bottom,
        })
    }

    /// Reference lunar configuration: 57.29 angle divisor, insulated bottom.
    pub fn reference() -> Self {
        Self::from_properties(
            &RegolithProperties::lunar_reference(),
            AngleConversion::Reference,
            BottomBoundary::Insulated,
        )
        .expect("lunar reference properties are valid")
    }

    /// Time step (s) covered by one phase increment (degrees).
    #[inline]
    pub fn time_step_s(&self, phase_increment_deg: f64) -> f64 {
        phase_increment_deg * self.lunation_s / 360.0
    }

    /// Phase increment (degrees) equivalent to a time step (s).
    #[inline]
    pub fn phase_increment_deg(&self, time_step_s: f64) -> f64 {
        time_step_s * 360.0 / self.lunation_s
    }

    /// Temperature of the virtual neighbor below the deepest layer.
    #[inline]
    pub fn below_bottom_k(&self, deepest_k: f64) -> f64 {
        match self.bottom {
            BottomBoundary::Insulated => deepest_k,
            BottomBoundary::FixedTemperature(t) => t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lt_core::units::*;
    use lt_core::{Tolerances, nearly_equal};

    #[test]
    fn reference_coefficients() {
        let cfg = ModelConfig::reference();
        let tol = Tolerances::default();
        assert_eq!(cfg.layer_count, 30);
        assert_eq!(cfg.beta_w_per_k, 0.15);
        assert_eq!(cfg.gamma_j_per_k, 10050.0);
        assert!(nearly_equal(cfg.alpha, (-0.01_f64).exp(), tol));
        assert_eq!(cfg.albedo, 0.15);
        assert_eq!(cfg.solar_constant_w_m2, 1365.0);
        assert_eq!(cfg.lunation_s, 2_551_440.0);
        assert_eq!(cfg.angle_conversion.degrees_per_radian(), 57.29);
        assert_eq!(cfg.bottom, BottomBoundary::Insulated);
    }

    #[test]
    fn lunar_reference_properties_validate() {
        let cfg = ModelConfig::from_properties(
            &RegolithProperties::lunar_reference(),
            AngleConversion::Reference,
            BottomBoundary::Insulated,
        )
        .unwrap();
        assert_eq!(cfg, ModelConfig::reference());
    }

    #[test]
    fn time_step_from_phase_increment() {
        let cfg = ModelConfig::reference();
        let dt = cfg.time_step_s(0.05);
        assert!(nearly_equal(dt, 0.05 * SYNODIC_MONTH_S / 360.0, Tolerances::default()));
        assert!(nearly_equal(
            cfg.phase_increment_deg(dt),
            0.05,
            Tolerances::default()
        ));
    }

    #[test]
    fn exact_conversion_is_180_over_pi() {
        let d = AngleConversion::Exact.degrees_per_radian();
        assert!((d - 57.295_779_513).abs() < 1e-8);
    }

    #[test]
    fn rejects_bad_albedo() {
        let props = RegolithProperties {
            albedo: unitless(1.5),
            ..RegolithProperties::lunar_reference()
        };
        let err = ModelConfig::from_properties(
            &props,
            AngleConversion::Reference,
            BottomBoundary::Insulated,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::Core(_)));
    }

    #[test]
    fn rejects_single_layer() {
        let props = RegolithProperties {
            layer_count: 1,
            ..RegolithProperties::lunar_reference()
        };
        let err = ModelConfig::from_properties(
            &props,
            AngleConversion::Reference,
            BottomBoundary::Insulated,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_non_positive_fixed_boundary() {
        let err = ModelConfig::from_properties(
            &RegolithProperties::lunar_reference(),
            AngleConversion::Reference,
            BottomBoundary::FixedTemperature(0.0),
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::Core(_)));
    }

    #[test]
    fn below_bottom_follows_boundary() {
        let cfg = ModelConfig::reference();
        assert_eq!(cfg.below_bottom_k(240.0), 240.0);

        let fixed = ModelConfig {
            bottom: BottomBoundary::FixedTemperature(250.0),
            ..ModelConfig::reference()
        };
        assert_eq!(fixed.below_bottom_k(240.0), 250.0);
    }

    #[test]
    fn transparent_column_has_unit_alpha() {
        let props = RegolithProperties {
            rf_absorption_per_m: 0.0,
            area: m2(2.0),
            ..RegolithProperties::lunar_reference()
        };
        let cfg = ModelConfig::from_properties(
            &props,
            AngleConversion::Exact,
            BottomBoundary::Insulated,
        )
        .unwrap();
        assert_eq!(cfg.alpha, 1.0);
        assert!(nearly_equal(cfg.beta_w_per_k, 2.0, Tolerances::default()));
    }
}
