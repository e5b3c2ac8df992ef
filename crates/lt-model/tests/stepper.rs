//! Integration tests: thermal stepper behavior on the reference column.
//!
//! Covers:
//! - the noon step from a uniform 225 K column against a hand evaluation
//! - the first midnight step pinned to a known surface value
//! - determinism of repeated steps
//! - no spurious gradients without sources or sinks
//! - night-side surface update without an absorption term
//! - both bottom boundary policies

use lt_model::{
    AngleConversion, BottomBoundary, DepthTemperatureProfile, ModelConfig, ThermalStepper,
    absorbed_flux_w_m2,
};
use proptest::prelude::*;

const TOL: f64 = 1e-6;

#[test]
fn noon_step_from_uniform_column() {
    let cfg = ModelConfig::reference();
    let stepper = ThermalStepper::new(cfg.clone());
    let profile = DepthTemperatureProfile::uniform(30, 225.0).unwrap();

    let out = stepper.step(&profile, 180.0, 0.05);

    let dt = 0.05 * 2_551_440.0 / 360.0;
    let insolation = (1.0 - 0.15) * 1365.0 * (0.0_f64 / 57.29).cos();
    let sigma = 5.67e-8;
    let t0 = 225.0_f64;
    let expected_surface = t0 + (1.0 * (insolation - sigma * t0.powi(4)) + 0.0) * dt / 10050.0;

    let surface = out.profile.surface_k();
    assert!(surface > 225.0, "surface should heat at noon");
    assert!(
        (surface - expected_surface).abs() < TOL,
        "surface {surface} vs expected {expected_surface}"
    );

    // Interior layers see no gradient, so conduction moves nothing.
    for (i, &t) in out.profile.as_slice().iter().enumerate().skip(1) {
        assert!((t - 225.0).abs() < TOL, "layer {i} changed to {t}");
    }
}

#[test]
fn first_midnight_step_surface_value() {
    // One 0.05 deg step at midnight from a uniform 225 K column.
    let stepper = ThermalStepper::new(ModelConfig::reference());
    let profile = DepthTemperatureProfile::initial(stepper.config());

    let out = stepper.step(&profile, 0.0, 0.05);

    assert!((out.profile.surface_k() - 219.876_108_403_684_7).abs() < 1e-9);
    assert_eq!(out.profile.as_slice()[1], 225.0);
}

#[test]
fn second_noon_step_conducts_into_layer_one() {
    let cfg = ModelConfig::reference();
    let stepper = ThermalStepper::new(cfg.clone());
    let p0 = DepthTemperatureProfile::initial(&cfg);

    let p1 = stepper.step(&p0, 180.0, 0.05).profile;
    let p2 = stepper.step(&p1, 180.05, 0.05).profile;

    let gain = cfg.time_step_s(0.05) / cfg.gamma_j_per_k;
    let t = p1.as_slice();
    let expected = t[1] + ((t[2] - t[1]) * cfg.beta_w_per_k + (t[0] - t[1]) * cfg.beta_w_per_k) * gain;

    assert!((p2.as_slice()[1] - expected).abs() < TOL);
    assert!(p2.as_slice()[1] > 225.0);
    assert_eq!(p2.as_slice()[2], 225.0);
}

#[test]
fn no_sources_or_sinks_keeps_uniform_column() {
    let cfg = ModelConfig {
        albedo: 1.0,
        stefan_boltzmann: 0.0,
        ..ModelConfig::reference()
    };
    let stepper = ThermalStepper::new(cfg.clone());
    let mut profile = DepthTemperatureProfile::initial(&cfg);

    for k in 0..7200 {
        let phase = k as f64 * 0.05;
        profile = stepper.step(&profile, phase, 0.05).profile;
    }

    assert!(profile.as_slice().iter().all(|&t| t == cfg.mean_temperature_k));
}

#[test]
fn dark_column_only_loses_heat_through_the_surface() {
    let cfg = ModelConfig {
        albedo: 1.0,
        ..ModelConfig::reference()
    };
    let stepper = ThermalStepper::new(cfg.clone());
    let profile = DepthTemperatureProfile::initial(&cfg);

    for phase in [0.0, 90.0, 180.0, 270.0] {
        assert_eq!(absorbed_flux_w_m2(&cfg, phase), 0.0);
        let out = stepper.step(&profile, phase, 0.05);
        assert!(out.profile.surface_k() < 225.0);
        assert!(out.profile.as_slice()[1..].iter().all(|&t| t == 225.0));
    }
}

#[test]
fn night_surface_update_is_emission_plus_conduction() {
    let cfg = ModelConfig::reference();
    let stepper = ThermalStepper::new(cfg.clone());
    let profile =
        DepthTemperatureProfile::from_values((0..30).map(|i| 150.0 + 3.0 * i as f64).collect())
            .unwrap();

    let out = stepper.step(&profile, 30.0, 0.05);

    let t = profile.as_slice();
    let gain = cfg.time_step_s(0.05) / cfg.gamma_j_per_k;
    let expected = t[0]
        + (cfg.radiating_area_m2 * (0.0 - cfg.stefan_boltzmann * t[0].powi(4))
            + (t[1] - t[0]) * cfg.beta_w_per_k)
            * gain;
    assert!((out.profile.surface_k() - expected).abs() < 1e-9);
}

#[test]
fn bottom_boundaries_differ_only_at_the_deepest_layer() {
    let insulated = ThermalStepper::new(ModelConfig::reference());
    let fixed = ThermalStepper::new(ModelConfig {
        bottom: BottomBoundary::FixedTemperature(250.0),
        ..ModelConfig::reference()
    });
    let profile = DepthTemperatureProfile::initial(insulated.config());

    let a = insulated.step(&profile, 100.0, 0.05).profile;
    let b = fixed.step(&profile, 100.0, 0.05).profile;

    assert_eq!(a.as_slice()[..29], b.as_slice()[..29]);
    assert_eq!(a.deepest_k(), 225.0);
    assert!(b.deepest_k() > 225.0);
}

#[test]
fn exact_angle_conversion_changes_day_side_only() {
    let reference = ThermalStepper::new(ModelConfig::reference());
    let exact = ThermalStepper::new(ModelConfig {
        angle_conversion: AngleConversion::Exact,
        ..ModelConfig::reference()
    });
    let profile = DepthTemperatureProfile::initial(reference.config());

    let day_ref = reference.step(&profile, 120.0, 0.05);
    let day_exact = exact.step(&profile, 120.0, 0.05);
    assert_ne!(day_ref.profile, day_exact.profile);

    let night_ref = reference.step(&profile, 10.0, 0.05);
    let night_exact = exact.step(&profile, 10.0, 0.05);
    assert_eq!(night_ref, night_exact);
}

proptest! {
    #[test]
    fn step_is_deterministic(
        layers in prop::collection::vec(100.0_f64..400.0, 30),
        phase in 0.0_f64..360.0,
        dphase in 0.001_f64..0.1,
    ) {
        let stepper = ThermalStepper::new(ModelConfig::reference());
        let profile = DepthTemperatureProfile::from_values(layers).unwrap();

        let a = stepper.step(&profile, phase, dphase);
        let b = stepper.step(&profile, phase, dphase);

        prop_assert_eq!(a.brightness_k.to_bits(), b.brightness_k.to_bits());
        for (x, y) in a.profile.as_slice().iter().zip(b.profile.as_slice()) {
            prop_assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn step_preserves_layer_count(phase in -720.0_f64..720.0) {
        let stepper = ThermalStepper::new(ModelConfig::reference());
        let profile = DepthTemperatureProfile::initial(stepper.config());
        let out = stepper.step(&profile, phase, 0.05);
        prop_assert_eq!(out.profile.len(), 30);
    }
}
