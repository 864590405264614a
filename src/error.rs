use std::fmt;

use thiserror::Error;

use crate::domain::context::operation_context::OperationContext;

/// A single field that did not match its validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub expected: &'static str,
    pub found: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}' expected {}, found {}", self.field, self.expected, self.found)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Remote platform answered with status {status}: {body}")]
    RemoteError { status: u16, body: String },

    #[error("Invalid client configuration: {0}")]
    ConfigError(String),

    #[error("Invalid folder path: '{0}'")]
    InvalidFolderPath(String),

    #[error("Invalid model filename: '{0}'")]
    InvalidFilename(String),

    #[error("Invalid session id: '{0}'")]
    InvalidSessionId(String),

    #[error("Input validation failed: {}", format_violations(.0))]
    SchemaValidation(Vec<FieldViolation>),

    #[error("Failed to build internal domain model: {0}")]
    ModelConstructionError(String),

    #[error("[{}] {source}", .context.action.as_deref().unwrap_or("unknown action"))]
    Contextual {
        context: OperationContext,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attaches `context` to the error. Empty contexts and errors that already carry a context are
    /// returned unchanged, so the innermost attribution wins.
    pub fn with_context(self, context: OperationContext) -> Error {
        match self {
            Error::Contextual { .. } => self,
            _ if context.is_empty() => self,
            _ => Error::Contextual { context, source: Box::new(self) },
        }
    }

    /// The action this error was attributed to, if any.
    pub fn action(&self) -> Option<&str> {
        match self {
            Error::Contextual { context, .. } => context.action.as_deref(),
            _ => None,
        }
    }

    /// The underlying error with any context wrapper removed.
    pub fn root(&self) -> &Error {
        match self {
            Error::Contextual { source, .. } => source.root(),
            _ => self,
        }
    }
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;
