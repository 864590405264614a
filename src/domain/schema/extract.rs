use serde_json::{Map, Value};

use crate::domain::schema::input_descriptor::{EXTERNAL_INPUT_PREFIX, InputConstraints, InputType, WorkflowInputDescriptor};

/// Key of the API-format graph inside a workflow version record.
pub const WORKFLOW_API_KEY: &str = "workflow_api";

/// Collects the declared inputs of a workflow version in graph order.
///
/// Returns `None` when the record has no object-shaped `workflow_api` graph. Nodes that are not
/// objects, have no `class_type`, or use an input kind this client does not know are skipped.
pub fn extract_inputs(workflow_version: &Value) -> Option<Vec<WorkflowInputDescriptor>> {
    let graph = workflow_version.get(WORKFLOW_API_KEY)?.as_object()?;

    let inputs = graph
        .iter()
        .filter_map(|(node_id, node)| {
            let node = node.as_object()?;
            let class_type = node.get("class_type")?.as_str()?;

            let Some(input_type) = InputType::from_class_type(class_type) else {
                if class_type.starts_with(EXTERNAL_INPUT_PREFIX) {
                    log::debug!("Skipping node '{}' with unsupported input class '{}'.", node_id, class_type);
                }
                return None;
            };

            let empty = Map::new();
            let node_inputs = node.get("inputs").and_then(Value::as_object).unwrap_or(&empty);

            Some(WorkflowInputDescriptor {
                node_id: node_id.clone(),
                class_type: class_type.to_string(),
                input_id: node_inputs.get("input_id").and_then(Value::as_str).map(str::to_string),
                input_type,
                default_value: node_inputs.get("default_value").filter(|v| !v.is_null()).cloned(),
                constraints: read_constraints(node_inputs),
            })
        })
        .collect();

    Some(inputs)
}

fn read_constraints(node_inputs: &Map<String, Value>) -> InputConstraints {
    let options = node_inputs
        .get("options")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    InputConstraints {
        min: node_inputs.get("min_value").and_then(Value::as_f64),
        max: node_inputs.get("max_value").and_then(Value::as_f64),
        options,
    }
}
