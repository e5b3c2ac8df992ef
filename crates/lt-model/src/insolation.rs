//! Solar forcing at the surface as a function of phase.
//!
//! Phase 180 deg is local noon, 0/360 deg local midnight.

use crate::config::ModelConfig;

/// Solar zenith angle (degrees) for a phase angle (degrees).
#[inline]
pub fn zenith_angle_deg(phase_deg: f64) -> f64 {
    (phase_deg - 180.0).abs()
}

/// Absorbed solar flux (W/m²); exactly zero on the night side.
pub fn absorbed_flux_w_m2(config: &ModelConfig, phase_deg: f64) -> f64 {
    let z = zenith_angle_deg(phase_deg);
    if z > 90.0 {
        return 0.0;
    }
    let z_rad = z / config.angle_conversion.degrees_per_radian();
    (1.0 - config.albedo) * config.solar_constant_w_m2 * z_rad.cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AngleConversion;
    use proptest::prelude::*;

    #[test]
    fn noon_gets_full_absorbed_flux() {
        let cfg = ModelConfig::reference();
        let i = absorbed_flux_w_m2(&cfg, 180.0);
        assert_eq!(i, (1.0 - 0.15) * 1365.0);
    }

    #[test]
    fn midnight_and_terminator() {
        let cfg = ModelConfig::reference();
        assert_eq!(absorbed_flux_w_m2(&cfg, 0.0), 0.0);
        assert_eq!(absorbed_flux_w_m2(&cfg, 359.95), 0.0);
        assert_eq!(absorbed_flux_w_m2(&cfg, 89.99), 0.0);
        // 90 deg is still day side; 57.29 leaves cos slightly below zero there
        assert!(absorbed_flux_w_m2(&cfg, 90.0).abs() < 1.0);
    }

    #[test]
    fn exact_conversion_zeroes_at_terminator() {
        let cfg = ModelConfig {
            angle_conversion: AngleConversion::Exact,
            ..ModelConfig::reference()
        };
        assert!(absorbed_flux_w_m2(&cfg, 90.0).abs() < 1e-9);
        let reference = ModelConfig::reference();
        assert_ne!(
            absorbed_flux_w_m2(&cfg, 150.0),
            absorbed_flux_w_m2(&reference, 150.0)
        );
    }

    #[test]
    fn out_of_range_phase_is_folded() {
        let cfg = ModelConfig::reference();
        assert_eq!(zenith_angle_deg(-10.0), 190.0);
        assert_eq!(absorbed_flux_w_m2(&cfg, -10.0), 0.0);
        assert_eq!(absorbed_flux_w_m2(&cfg, 400.0), 0.0);
    }

    proptest! {
        #[test]
        fn symmetric_about_noon(k in 0_u32..=5760) {
            // dyadic offsets keep 180 +/- x exact
            let x = f64::from(k) / 64.0;
            let cfg = ModelConfig::reference();
            prop_assert_eq!(
                absorbed_flux_w_m2(&cfg, 180.0 + x),
                absorbed_flux_w_m2(&cfg, 180.0 - x)
            );
        }

        #[test]
        fn night_side_is_exactly_zero(phase in 0.0_f64..360.0) {
            prop_assume!((phase - 180.0).abs() > 90.0);
            let cfg = ModelConfig::reference();
            prop_assert_eq!(absorbed_flux_w_m2(&cfg, phase), 0.0);
        }
    }
}
