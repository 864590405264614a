use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Body of `POST file`: register a model file from a remote url.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegisterModelRequestDto {
    pub url: String,
    pub folder_path: String,
    /// Custom name for the stored file. Empty keeps the name from `url`.
    #[serde(default)]
    pub filename: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelFileDto {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,

    #[serde(flatten)]
    pub extra_fields: HashMap<String, serde_json::Value>,
}
