use std::collections::HashSet;
use std::fmt;

use serde_json::{Map, Value};

use crate::domain::schema::extract::extract_inputs;
use crate::domain::schema::input_descriptor::WorkflowInputDescriptor;
use crate::error::{Error, FieldViolation, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidator {
    /// Accepts a missing key, `null` or any JSON string.
    OptionalString,
}

impl FieldValidator {
    pub fn check(&self, field: &str, value: &Value) -> std::result::Result<(), FieldViolation> {
        match (self, value) {
            (FieldValidator::OptionalString, Value::Null | Value::String(_)) => Ok(()),
            (FieldValidator::OptionalString, other) => {
                Err(FieldViolation { field: field.to_string(), expected: "string or null", found: json_kind(other).to_string() })
            }
        }
    }
}

impl fmt::Display for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValidator::OptionalString => write!(f, "optional string"),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: String,
    pub validator: FieldValidator,
}

/// Field-level validator for the inputs of one workflow version.
///
/// Fields are kept in declaration order; forms render and report errors in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedSchema {
    fields: Vec<SchemaField>,
}

impl SynthesizedSchema {
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checks `value` against every declared field.
    ///
    /// Returns the declared fields that were present, in schema order. Undeclared keys are
    /// dropped. All violations are reported at once.
    pub fn validate(&self, value: &Value) -> Result<Map<String, Value>> {
        let object = value.as_object().ok_or_else(|| {
            Error::SchemaValidation(vec![FieldViolation {
                field: String::new(),
                expected: "object",
                found: json_kind(value).to_string(),
            }])
        })?;

        let mut accepted = Map::new();
        let mut violations = Vec::new();

        for field in &self.fields {
            let Some(field_value) = object.get(&field.name) else {
                continue;
            };
            match field.validator.check(&field.name, field_value) {
                Ok(()) => {
                    accepted.insert(field.name.clone(), field_value.clone());
                }
                Err(violation) => violations.push(violation),
            }
        }

        if violations.is_empty() { Ok(accepted) } else { Err(Error::SchemaValidation(violations)) }
    }
}

/// Builds one optional-string field per distinct `input_id`.
///
/// Descriptors without an `input_id` are skipped and a repeated id keeps its first position.
/// `None` or an empty list means there is no schema at all.
pub fn synthesize(inputs: Option<&[WorkflowInputDescriptor]>) -> Option<SynthesizedSchema> {
    let inputs = inputs.filter(|inputs| !inputs.is_empty())?;

    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(inputs.len());

    for input in inputs {
        let Some(input_id) = input.input_id.as_deref() else {
            log::debug!("Skipping input on node '{}' without an input_id.", input.node_id);
            continue;
        };
        if !seen.insert(input_id) {
            log::warn!("Duplicate input_id '{}' on node '{}' ignored.", input_id, input.node_id);
            continue;
        }
        fields.push(SchemaField { name: input_id.to_string(), validator: FieldValidator::OptionalString });
    }

    Some(SynthesizedSchema { fields })
}

pub fn build_schema_from_workflow_version(workflow_version: &Value) -> Option<SynthesizedSchema> {
    let inputs = extract_inputs(workflow_version);
    synthesize(inputs.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::input_descriptor::InputType;
    use serde_json::json;

    fn text(id: &str) -> WorkflowInputDescriptor {
        WorkflowInputDescriptor::new(id, InputType::Text)
    }

    #[test]
    fn all_fields_are_optional_strings() {
        let inputs = vec![text("a"), text("b")];
        let schema = synthesize(Some(&inputs)).unwrap();

        assert_eq!(schema.field_names().collect::<Vec<_>>(), ["a", "b"]);
        assert!(schema.validate(&json!({ "a": "x", "b": "y" })).is_ok());
        assert!(schema.validate(&json!({})).unwrap().is_empty());
        assert!(schema.validate(&json!({ "a": null })).is_ok());

        let field = schema.field("b").unwrap();
        assert_eq!(field.validator, FieldValidator::OptionalString);
        assert_eq!(field.validator.to_string(), "optional string");
        assert!(schema.field("c").is_none());
        assert_eq!(schema.fields().len(), schema.len());
    }

    #[test]
    fn no_inputs_means_no_schema() {
        assert_eq!(synthesize(None), None);
        assert_eq!(synthesize(Some(&[])), None);
    }

    #[test]
    fn inputs_without_id_are_skipped() {
        let mut nameless = text("ignored");
        nameless.input_id = None;
        let inputs = vec![text("prompt"), nameless, text("negative")];

        let schema = synthesize(Some(&inputs)).unwrap();
        assert_eq!(schema.field_names().collect::<Vec<_>>(), ["prompt", "negative"]);
    }

    #[test]
    fn only_id_less_inputs_give_an_empty_schema() {
        let mut nameless = text("ignored");
        nameless.input_id = None;

        let schema = synthesize(Some(&[nameless])).unwrap();
        assert!(schema.is_empty());
    }

    #[test]
    fn duplicate_ids_keep_first_position() {
        let inputs = vec![text("seed"), text("prompt"), text("seed")];
        let schema = synthesize(Some(&inputs)).unwrap();
        assert_eq!(schema.field_names().collect::<Vec<_>>(), ["seed", "prompt"]);
    }

    #[test]
    fn validation_strips_unknown_keys_and_keeps_schema_order() {
        let schema = synthesize(Some(&[text("b"), text("a")])).unwrap();
        let accepted = schema.validate(&json!({ "a": "1", "extra": 5, "b": "2" })).unwrap();

        assert_eq!(accepted.keys().collect::<Vec<_>>(), ["b", "a"]);
    }

    #[test]
    fn validation_reports_every_violation() {
        let schema = synthesize(Some(&[text("a"), text("b"), text("c")])).unwrap();
        let err = schema.validate(&json!({ "a": 1, "b": "fine", "c": [true] })).unwrap_err();

        match err {
            Error::SchemaValidation(violations) => {
                let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(fields, ["a", "c"]);
                assert_eq!(violations[0].found, "number");
                assert_eq!(violations[1].found, "array");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let schema = synthesize(Some(&[text("a")])).unwrap();
        assert!(matches!(schema.validate(&json!("a")), Err(Error::SchemaValidation(_))));
    }

    #[test]
    fn builds_from_workflow_version() {
        let version = json!({
            "id": "v3",
            "workflow_api": {
                "4": { "class_type": "ComfyUIDeployExternalText", "inputs": { "input_id": "positive_prompt" } },
                "5": { "class_type": "CheckpointLoaderSimple", "inputs": { "ckpt_name": "sd15.safetensors" } },
                "6": { "class_type": "ComfyUIDeployExternalSeed", "inputs": { "input_id": "seed" } }
            }
        });

        let schema = build_schema_from_workflow_version(&version).unwrap();
        assert_eq!(schema.field_names().collect::<Vec<_>>(), ["positive_prompt", "seed"]);
    }

    #[test]
    fn workflow_version_without_graph_has_no_schema() {
        assert_eq!(build_schema_from_workflow_version(&json!({ "id": "v1" })), None);
        assert_eq!(build_schema_from_workflow_version(&json!({ "workflow_api": {} })), None);
        assert_eq!(build_schema_from_workflow_version(&Value::Null), None);
    }
}
