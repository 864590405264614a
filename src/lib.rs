use std::sync::Arc;

use crate::config::ClientConfig;
use crate::domain::models::ModelRegistry;
use crate::domain::platform::{PlatformClient, PlatformSearch, SearchResource};
use crate::domain::search::SearchPager;
use crate::domain::session::SessionTimeoutController;
use crate::error::Result;

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Entry point bundling the orchestration services over one platform connection.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub config: ClientConfig,
    pub client: PlatformClient,
}

impl Dashboard {
    pub fn connect(config: ClientConfig) -> Result<Dashboard> {
        let client = PlatformClient::from_config(&config)?;
        log::info!("Platform client ready for '{}'.", config.api_url);
        Ok(Dashboard { config, client })
    }

    pub fn with_client(config: ClientConfig, client: PlatformClient) -> Dashboard {
        Dashboard { config, client }
    }

    pub fn sessions(&self) -> SessionTimeoutController {
        SessionTimeoutController::new(self.client.clone())
    }

    pub fn models(&self) -> ModelRegistry {
        ModelRegistry::new(self.client.clone())
    }

    /// A pager over `resource` using the configured page size.
    pub fn search<T>(&self, resource: SearchResource) -> SearchPager<T>
    where
        T: serde::de::DeserializeOwned + Send + 'static,
    {
        let source = Arc::new(PlatformSearch::<T>::new(self.client.clone(), resource));
        SearchPager::new(resource.logical_key(), self.config.page_size, source)
    }
}
