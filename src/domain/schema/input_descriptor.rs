use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Node class prefix shared by every external input node of a workflow graph.
pub const EXTERNAL_INPUT_PREFIX: &str = "ComfyUIDeployExternal";

/// Normalised kind of a declared workflow input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InputType {
    Text,
    Number,
    NumberInt,
    NumberSlider,
    Boolean,
    Image,
    ImageAlpha,
    ImageBatch,
    Video,
    Checkpoint,
    Lora,
    Seed,
}

impl InputType {
    /// Maps a node `class_type` to its input kind. Unknown or non-input classes yield `None`.
    pub fn from_class_type(class_type: &str) -> Option<InputType> {
        let kind = class_type.strip_prefix(EXTERNAL_INPUT_PREFIX)?;
        let input_type = match kind {
            "Text" | "TextAny" => InputType::Text,
            "Number" => InputType::Number,
            "NumberInt" => InputType::NumberInt,
            "NumberSlider" => InputType::NumberSlider,
            "Boolean" => InputType::Boolean,
            "Image" | "ImageUrl" => InputType::Image,
            "ImageAlpha" => InputType::ImageAlpha,
            "ImageBatch" => InputType::ImageBatch,
            "Video" => InputType::Video,
            "Checkpoint" => InputType::Checkpoint,
            "Lora" => InputType::Lora,
            "Seed" => InputType::Seed,
            _ => return None,
        };
        Some(input_type)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Number => "number",
            InputType::NumberInt => "number_int",
            InputType::NumberSlider => "number_slider",
            InputType::Boolean => "boolean",
            InputType::Image => "image",
            InputType::ImageAlpha => "image_alpha",
            InputType::ImageBatch => "image_batch",
            InputType::Video => "video",
            InputType::Checkpoint => "checkpoint",
            InputType::Lora => "lora",
            InputType::Seed => "seed",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputConstraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub options: Vec<String>,
}

/// One declared input of a workflow version, as found in its graph.
///
/// `input_id` stays optional because upstream graphs are not guaranteed to set it; such
/// descriptors are carried through extraction and dropped during synthesis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowInputDescriptor {
    pub node_id: String,
    pub class_type: String,
    pub input_id: Option<String>,
    pub input_type: InputType,
    pub default_value: Option<Value>,
    pub constraints: InputConstraints,
}

impl WorkflowInputDescriptor {
    pub fn new(input_id: impl Into<String>, input_type: InputType) -> Self {
        WorkflowInputDescriptor {
            node_id: String::new(),
            class_type: String::new(),
            input_id: Some(input_id.into()),
            input_type,
            default_value: None,
            constraints: InputConstraints::default(),
        }
    }
}
