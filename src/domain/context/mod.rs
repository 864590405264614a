pub mod context_stack;
pub mod operation_context;
pub mod scope;

pub use context_stack::{ContextStack, clear_context, get_context, run_with_context, set_context};
pub use operation_context::OperationContext;
pub use scope::{current, run_scoped};
