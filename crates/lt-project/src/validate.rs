//! Scenario validation logic.

use crate::schema::{BottomBoundaryDef, ModelDef, RunDef, Scenario};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be positive and finite"))
    }
}

fn require_non_negative(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be non-negative and finite"))
    }
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }
    if scenario.name.trim().is_empty() {
        return Err(invalid("name", "", "must not be empty"));
    }
    validate_model(&scenario.model)?;
    validate_run(&scenario.run)?;
    Ok(())
}

fn validate_model(model: &ModelDef) -> Result<(), ValidationError> {
    if model.layer_count < 2 {
        return Err(invalid(
            "model.layer_count",
            model.layer_count,
            "at least 2 layers are required",
        ));
    }
    require_positive("model.layer_spacing_m", model.layer_spacing_m)?;
    require_positive("model.conductivity_w_m_k", model.conductivity_w_m_k)?;
    require_positive("model.density_kg_m3", model.density_kg_m3)?;
    require_positive("model.specific_heat_j_kg_k", model.specific_heat_j_kg_k)?;
    require_positive("model.area_m2", model.area_m2)?;
    require_non_negative("model.rf_absorption_per_m", model.rf_absorption_per_m)?;
    require_non_negative("model.solar_constant_w_m2", model.solar_constant_w_m2)?;
    require_positive("model.lunation_s", model.lunation_s)?;
    require_positive("model.mean_temperature_k", model.mean_temperature_k)?;

    if !(0.0..=1.0).contains(&model.albedo) {
        return Err(invalid("model.albedo", model.albedo, "must be within [0, 1]"));
    }

    if let BottomBoundaryDef::FixedTemperature { temperature_k } = model.bottom_boundary {
        require_positive("model.bottom_boundary.temperature_k", temperature_k)?;
    }
    Ok(())
}

fn validate_run(run: &RunDef) -> Result<(), ValidationError> {
    if run.lunations == 0 {
        return Err(invalid("run.lunations", run.lunations, "must be positive"));
    }
    require_positive("run.phase_increment_deg", run.phase_increment_deg)?;
    if run.phase_increment_deg > 360.0 {
        return Err(invalid(
            "run.phase_increment_deg",
            run.phase_increment_deg,
            "must not exceed 360",
        ));
    }
    if run.warmup_lunations >= run.lunations {
        return Err(invalid(
            "run.warmup_lunations",
            run.warmup_lunations,
            "must be below run.lunations",
        ));
    }
    if let Some(t) = run.initial_temperature_k {
        require_positive("run.initial_temperature_k", t)?;
    }
    Ok(())
}
