use lt_project::schema::*;
use lt_project::{load_json, load_yaml, save_json, save_yaml, validate_scenario};

#[test]
fn roundtrip_yaml_reference_scenario() {
    let scenario = Scenario::reference("Reference");
    validate_scenario(&scenario).unwrap();

    let path = std::env::temp_dir().join("lt_project_roundtrip_reference.yaml");
    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_json_fixed_bottom() {
    let mut scenario = Scenario::reference("Fixed bottom");
    scenario.model.bottom_boundary = BottomBoundaryDef::FixedTemperature {
        temperature_k: 235.0,
    };
    scenario.run.initial_temperature_k = Some(230.0);

    let path = std::env::temp_dir().join("lt_project_roundtrip_fixed.json");
    save_json(&path, &scenario).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn save_refuses_invalid_scenario() {
    let mut scenario = Scenario::reference("Bad");
    scenario.model.layer_count = 1;

    let path = std::env::temp_dir().join("lt_project_roundtrip_invalid.yaml");
    let err = save_yaml(&path, &scenario).unwrap_err();
    assert!(matches!(err, lt_project::ProjectError::Validation(_)));
}
