use std::future::Future;

use crate::domain::context::{context_stack::ContextStack, operation_context::OperationContext};

tokio::task_local! {
    static ACTIVE_SCOPE: OperationContext;
}

/// Runs `operation` with `context` bound to that future only.
///
/// Unlike [`ContextStack::run_with_context`] the value travels with the future being polled, so
/// operations interleaved on one task, or running on different tasks, never see each other's
/// context. Nested scopes shadow the outer one for their duration.
pub async fn run_scoped<F, T>(context: OperationContext, operation: F) -> T
where
    F: Future<Output = T>,
{
    ACTIVE_SCOPE.scope(context, operation).await
}

/// The context that applies to the caller right now.
///
/// The innermost [`run_scoped`] value wins. Outside of any scope the global slot is consulted.
pub fn current() -> OperationContext {
    ACTIVE_SCOPE.try_with(|context| context.clone()).unwrap_or_else(|_| ContextStack::global().get_context())
}
