use std::future::Future;
use std::sync::RwLock;

use lazy_static::lazy_static;

use crate::domain::context::operation_context::OperationContext;

lazy_static! {
    static ref GLOBAL_CONTEXT: ContextStack = ContextStack::new();
}

/// A single shared slot holding the active [`OperationContext`].
///
/// There is no history: every `set_context` overwrites the previous value. Sequential scoped
/// operations never leak into each other, but two scoped operations that overlap across an
/// `.await` share the slot and will see each other's context. Use
/// [`run_scoped`](crate::domain::context::scope::run_scoped) when operations may overlap.
#[derive(Debug, Default)]
pub struct ContextStack {
    slot: RwLock<OperationContext>,
}

impl ContextStack {
    pub fn new() -> Self {
        ContextStack { slot: RwLock::new(OperationContext::default()) }
    }

    /// The process-wide instance used by the free functions of this module.
    pub fn global() -> &'static ContextStack {
        &GLOBAL_CONTEXT
    }

    /// Replaces the active context. `None` stores the empty context.
    pub fn set_context(&self, context: Option<OperationContext>) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = context.unwrap_or_default();
    }

    pub fn clear_context(&self) {
        self.set_context(None);
    }

    /// Snapshot of the active context.
    pub fn get_context(&self) -> OperationContext {
        self.slot.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// Sets `context`, awaits `operation` and clears the slot once it settles.
    ///
    /// The slot is also cleared when `operation` panics or when the returned future is dropped
    /// before completion. The output of `operation`, including any `Err`, is returned untouched.
    pub async fn run_with_context<F, T>(&self, context: OperationContext, operation: F) -> T
    where
        F: Future<Output = T>,
    {
        self.set_context(Some(context));
        let _guard = ClearOnDrop { stack: self };
        operation.await
    }
}

struct ClearOnDrop<'a> {
    stack: &'a ContextStack,
}

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        self.stack.clear_context();
    }
}

pub fn set_context(context: Option<OperationContext>) {
    ContextStack::global().set_context(context);
}

pub fn clear_context() {
    ContextStack::global().clear_context();
}

pub fn get_context() -> OperationContext {
    ContextStack::global().get_context()
}

pub async fn run_with_context<F, T>(context: OperationContext, operation: F) -> T
where
    F: Future<Output = T>,
{
    ContextStack::global().run_with_context(context, operation).await
}
