use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Session record as returned by `GET session/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionDto {
    #[serde(alias = "id")]
    pub session_id: String,
    #[serde(default)]
    pub machine_id: Option<String>,
    #[serde(default)]
    pub gpu: Option<String>,
    /// Minutes.
    #[serde(default)]
    pub timeout: Option<u32>,
    #[serde(default, alias = "tunnel_url")]
    pub url: Option<String>,
    pub created_at: String,

    #[serde(flatten)]
    pub extra_fields: HashMap<String, serde_json::Value>,
}

/// Body of `POST session/increase-timeout`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IncreaseTimeoutRequestDto {
    pub timeout: u32,
    pub machine_id: String,
    pub session_id: String,
    pub gpu: String,
}

/// Acknowledgement of a timeout extension. Only the common fields are typed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TimeoutAckDto {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,

    #[serde(flatten)]
    pub extra_fields: HashMap<String, serde_json::Value>,
}
