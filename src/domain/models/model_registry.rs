use serde_json::Value;

use crate::api::model_dto::{ModelFileDto, RegisterModelRequestDto};
use crate::domain::models::path_rules::{is_valid_folder_path, is_valid_model_filename};
use crate::domain::platform::client::PlatformClient;
use crate::domain::platform::endpoint::ApiEndpoint;
use crate::error::{Error, Result};

/// Registers and lists model files on the remote platform. Paths are checked before any request.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    client: PlatformClient,
}

impl ModelRegistry {
    pub fn new(client: PlatformClient) -> Self {
        ModelRegistry { client }
    }

    pub fn check(request: &RegisterModelRequestDto) -> Result<()> {
        if !is_valid_folder_path(&request.folder_path) {
            return Err(Error::InvalidFolderPath(request.folder_path.clone()));
        }
        if !is_valid_model_filename(&request.filename) {
            return Err(Error::InvalidFilename(request.filename.clone()));
        }
        Ok(())
    }

    pub async fn register(&self, request: &RegisterModelRequestDto) -> Result<Value> {
        Self::check(request)?;
        log::info!("Registering model '{}' into '{}'.", request.url, request.folder_path);
        self.client.post(&ApiEndpoint::File, serde_json::to_value(request)?).await
    }

    pub async fn list(&self, folder_path: &str) -> Result<Vec<ModelFileDto>> {
        if !is_valid_folder_path(folder_path) {
            return Err(Error::InvalidFolderPath(folder_path.to_string()));
        }
        self.client.get(&ApiEndpoint::File, vec![("path".to_string(), folder_path.to_string())]).await
    }
}
