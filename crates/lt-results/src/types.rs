//! Result data types.

use lt_project::Scenario;
use lt_sim::{LunationSummary, RunReport};
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    pub timestamp: String,
    pub solver_version: String,
    pub layer_count: usize,
    pub lunations: usize,
    pub warmup_lunations: usize,
    pub phase_increment_deg: f64,
    pub steps: usize,
    pub records: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summaries: Vec<SummaryRecord>,
}

impl RunManifest {
    /// Manifest for a finished run, stamped with the current UTC time.
    pub fn from_report(
        run_id: RunId,
        scenario: &Scenario,
        report: &RunReport,
        solver_version: &str,
    ) -> Self {
        Self {
            run_id,
            scenario_name: scenario.name.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            solver_version: solver_version.to_string(),
            layer_count: report.final_state.profile.len(),
            lunations: scenario.run.lunations,
            warmup_lunations: scenario.run.warmup_lunations,
            phase_increment_deg: scenario.run.phase_increment_deg,
            steps: report.steps,
            records: report.records,
            summaries: summary_records(report),
        }
    }

    /// Convergence metric of the last lunation, if recorded.
    pub fn final_surface_change_k(&self) -> Option<f64> {
        self.summaries.last().and_then(|s| s.max_surface_change_k)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryRecord {
    pub lunation: usize,
    pub surface_min_k: f64,
    pub surface_max_k: f64,
    pub surface_mean_k: f64,
    pub brightness_mean_k: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_surface_change_k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_profile_change_k: Option<f64>,
}

impl From<&LunationSummary> for SummaryRecord {
    fn from(s: &LunationSummary) -> Self {
        Self {
            lunation: s.lunation,
            surface_min_k: s.surface_min_k,
            surface_max_k: s.surface_max_k,
            surface_mean_k: s.surface_mean_k,
            brightness_mean_k: s.brightness_mean_k,
            max_surface_change_k: s.max_surface_change_k,
            max_profile_change_k: s.max_profile_change_k,
        }
    }
}

/// Summaries of a finished run, one per lunation.
pub fn summary_records(report: &RunReport) -> Vec<SummaryRecord> {
    report.summaries.iter().map(SummaryRecord::from).collect()
}
