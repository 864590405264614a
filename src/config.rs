use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::config_dto::ClientConfigDto;
use crate::error::{Error, Result};
use crate::loader::parser::parse_json_file;

pub const ENV_API_URL: &str = "DASH_API_URL";
pub const ENV_API_TOKEN: &str = "DASH_API_TOKEN";

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Resolved settings for talking to the remote platform.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    /// Page size used for every paginated listing. Part of each search cache key.
    pub page_size: usize,
    pub request_timeout: Duration,
    pub log_dir: PathBuf,
}

impl ClientConfig {
    /// Loads a config file and applies environment overrides on top of it.
    pub fn load(file_path: impl AsRef<Path>) -> Result<ClientConfig> {
        let dto: ClientConfigDto = parse_json_file(file_path)?;
        Self::from_dto(dto, |key| std::env::var(key).ok())
    }

    /// Builds a config from environment variables only.
    pub fn from_env() -> Result<ClientConfig> {
        Self::from_dto(ClientConfigDto::default(), |key| std::env::var(key).ok())
    }

    /// `env` is consulted for `DASH_API_URL` / `DASH_API_TOKEN`, which take precedence over the dto.
    pub fn from_dto(dto: ClientConfigDto, env: impl Fn(&str) -> Option<String>) -> Result<ClientConfig> {
        let api_url = env(ENV_API_URL)
            .or(dto.api_url)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::ConfigError(format!("no API url configured (set '{}' or 'apiUrl')", ENV_API_URL)))?;

        let api_token = env(ENV_API_TOKEN).or(dto.api_token).filter(|token| !token.is_empty());

        let page_size = dto.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(Error::ConfigError("pageSize must be at least 1".to_string()));
        }

        Ok(ClientConfig {
            api_url,
            api_token,
            page_size,
            request_timeout: Duration::from_secs(dto.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)),
            log_dir: PathBuf::from(dto.log_dir.unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())),
        })
    }
}
