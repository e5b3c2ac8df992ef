//! Content-based hashing for run IDs.

use lt_project::Scenario;
use sha2::{Digest, Sha256};

pub fn compute_run_id(scenario: &Scenario, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    // The display name does not change the physics.
    let model_json = serde_json::to_string(&scenario.model).unwrap_or_default();
    hasher.update(model_json.as_bytes());

    let run_json = serde_json::to_string(&scenario.run).unwrap_or_default();
    hasher.update(run_json.as_bytes());

    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lt_project::BottomBoundaryDef;

    #[test]
    fn hash_stability() {
        let scenario = Scenario::reference("a");
        let hash1 = compute_run_id(&scenario, "v1");
        let hash2 = compute_run_id(&scenario, "v1");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_ignores_name() {
        let a = Scenario::reference("a");
        let b = Scenario::reference("b");
        assert_eq!(compute_run_id(&a, "v1"), compute_run_id(&b, "v1"));
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let a = Scenario::reference("a");
        let mut b = Scenario::reference("a");
        b.model.bottom_boundary = BottomBoundaryDef::FixedTemperature {
            temperature_k: 230.0,
        };

        assert_ne!(compute_run_id(&a, "v1"), compute_run_id(&b, "v1"));
        assert_ne!(compute_run_id(&a, "v1"), compute_run_id(&a, "v2"));
    }
}
