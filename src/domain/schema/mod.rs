pub mod extract;
pub mod input_descriptor;
pub mod synthesized_schema;

pub use extract::extract_inputs;
pub use input_descriptor::{InputConstraints, InputType, WorkflowInputDescriptor};
pub use synthesized_schema::{FieldValidator, SchemaField, SynthesizedSchema, build_schema_from_workflow_version, synthesize};
