use serde::{Deserialize, Serialize};

/// Metadata describing the logical operation that is currently running.
///
/// The default value is the empty context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationContext {
    pub action: Option<String>,
}

impl OperationContext {
    pub fn new(action: impl Into<String>) -> Self {
        OperationContext { action: Some(action.into()) }
    }

    pub fn is_empty(&self) -> bool {
        self.action.is_none()
    }
}
