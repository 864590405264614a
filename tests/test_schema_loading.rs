use std::path::PathBuf;

use dash_orchestration::domain::schema::{InputType, build_schema_from_workflow_version, extract_inputs};
use dash_orchestration::error::Error;
use dash_orchestration::loader::parser::parse_json_file;
use serde_json::{Value, json};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join(name)
}

fn workflow_version() -> Value {
    parse_json_file(fixture("workflow_version.json")).unwrap()
}

#[test]
fn test_fixture_inputs_in_graph_order() {
    let inputs = extract_inputs(&workflow_version()).unwrap();

    let kinds: Vec<_> = inputs.iter().map(|input| input.input_type).collect();
    assert_eq!(
        kinds,
        [InputType::Text, InputType::Text, InputType::Seed, InputType::NumberSlider, InputType::Image, InputType::Text]
    );

    let steps = inputs.iter().find(|input| input.input_id.as_deref() == Some("steps")).unwrap();
    assert_eq!(steps.node_id, "26");
    assert_eq!(steps.default_value, Some(json!(20)));
    assert_eq!(steps.constraints.min, Some(1.0));
    assert_eq!(steps.constraints.max, Some(60.0));
}

#[test]
fn test_fixture_schema_fields() {
    let schema = build_schema_from_workflow_version(&workflow_version()).unwrap();

    let names: Vec<_> = schema.field_names().collect();
    assert_eq!(names, ["positive_prompt", "negative_prompt", "seed", "steps", "reference_image"]);
    assert!(!schema.contains("face_model"));
    assert!(!schema.contains("ckpt_name"));
}

#[test]
fn test_fixture_schema_validates_payload() {
    let schema = build_schema_from_workflow_version(&workflow_version()).unwrap();

    let accepted = schema
        .validate(&json!({ "steps": "30", "positive_prompt": "a cat", "batch_size": 4 }))
        .unwrap();
    let keys: Vec<_> = accepted.keys().map(String::as_str).collect();
    assert_eq!(keys, ["positive_prompt", "steps"]);

    assert!(schema.validate(&json!({})).unwrap().is_empty());

    match schema.validate(&json!({ "seed": 42, "steps": true })) {
        Err(Error::SchemaValidation(violations)) => {
            let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
            assert_eq!(fields, ["seed", "steps"]);
        }
        other => panic!("expected schema violations, got {:?}", other),
    }
}

#[test]
fn test_version_without_graph_has_no_schema() {
    let mut version = workflow_version();
    version.as_object_mut().unwrap().remove("workflow_api");

    assert!(extract_inputs(&version).is_none());
    assert!(build_schema_from_workflow_version(&version).is_none());
}

#[test]
fn test_graph_without_external_inputs_has_no_schema() {
    let version = json!({
        "workflow_api": {
            "4": { "class_type": "CheckpointLoaderSimple", "inputs": { "ckpt_name": "sdxl.safetensors" } }
        }
    });

    assert_eq!(extract_inputs(&version).map(|inputs| inputs.len()), Some(0));
    assert!(build_schema_from_workflow_version(&version).is_none());
}

#[test]
fn test_missing_fixture_is_io_error() {
    let result: dash_orchestration::error::Result<Value> = parse_json_file(fixture("missing.json"));
    assert!(matches!(result, Err(Error::IoError(_))));
}
