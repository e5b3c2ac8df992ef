//! Radio brightness temperature of a layered column.
//!
//! Emission is accumulated from the deepest layer up: each layer passes on
//! a fraction `alpha` of what reaches it from below and adds `1 - alpha`
//! of its own temperature. With `alpha < 1` shallow layers dominate.

/// Brightness temperature (K) of `layers_k` (index 0 = surface), starting
/// below the column from `seed_k`.
pub fn brightness_temperature(layers_k: &[f64], alpha: f64, seed_k: f64) -> f64 {
    layers_k
        .iter()
        .rev()
        .fold(seed_k, |tb, &t| alpha * tb + (1.0 - alpha) * t)
}
