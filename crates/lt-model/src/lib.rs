//! Explicit finite-difference thermal model of a regolith column.
//!
//! Provides:
//! - Immutable model configuration derived from regolith properties
//! - Fixed-length depth temperature profiles
//! - Solar insolation from phase angle
//! - Radio brightness temperature by layer attenuation
//! - The forward-Euler thermal stepper
//! - Explicit-scheme stability limits

pub mod brightness;
pub mod config;
pub mod error;
pub mod insolation;
pub mod profile;
pub mod stability;
pub mod stepper;

// Re-exports for public API
pub use brightness::brightness_temperature;
pub use config::{AngleConversion, BottomBoundary, ModelConfig, RegolithProperties};
pub use error::{ModelError, ModelResult};
pub use insolation::{absorbed_flux_w_m2, zenith_angle_deg};
pub use profile::DepthTemperatureProfile;
pub use stability::StabilityReport;
pub use stepper::{StepOutput, ThermalStepper};
