use std::fmt;
use std::str::FromStr;

use reqwest::Method;

use crate::error::Error;

/// Listings that can be searched and paged through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchResource {
    Workflows,
    Deployments,
    Machines,
    Models,
    Runs,
    Sessions,
}

impl SearchResource {
    /// Name used as the logical part of search cache keys.
    pub fn logical_key(&self) -> &'static str {
        match self {
            Self::Workflows => "workflows",
            Self::Deployments => "deployments",
            Self::Machines => "machines",
            Self::Models => "models",
            Self::Runs => "runs",
            Self::Sessions => "sessions",
        }
    }
}

impl FromStr for SearchResource {
    type Err = Error;

    fn from_str(name: &str) -> Result<SearchResource, Self::Err> {
        match name {
            "workflows" => Ok(Self::Workflows),
            "deployments" => Ok(Self::Deployments),
            "machines" => Ok(Self::Machines),
            "models" => Ok(Self::Models),
            "runs" => Ok(Self::Runs),
            "sessions" => Ok(Self::Sessions),
            _ => Err(Error::ConfigError(format!("unknown search resource '{}'", name))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEndpoint {
    Session(String),
    IncreaseTimeout,
    File,
    Search(SearchResource),
}

impl ApiEndpoint {
    /// Path relative to the configured API url. Caller-supplied segments are percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Self::Session(session_id) => format!("session/{}", urlencoding::encode(session_id)),
            Self::IncreaseTimeout => "session/increase-timeout".to_string(),
            Self::File => "file".to_string(),
            Self::Search(resource) => resource.logical_key().to_string(),
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::IncreaseTimeout => Method::POST,
            Self::Session(_) | Self::File | Self::Search(_) => Method::GET,
        }
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
