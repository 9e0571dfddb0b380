//! The handler abstraction every pipeline entry satisfies.

use std::sync::Arc;

/// A unit of work in a pipeline.
///
/// A hook inspects the context and either produces a result, which
/// short-circuits the pipeline, or returns `None` to let the next entry run.
///
/// Closures of the shape `Fn(&Ctx) -> Option<Res>` are hooks, and so is
/// [`HookPipeline`](crate::HookPipeline) itself, which is what makes
/// pipelines nest.
pub trait Hook<Ctx, Res>: Send + Sync {
    /// Runs the hook against the context.
    fn invoke(&self, ctx: &Ctx) -> Option<Res>;
}

impl<Ctx, Res, F> Hook<Ctx, Res> for F
where
    F: Fn(&Ctx) -> Option<Res> + Send + Sync,
{
    fn invoke(&self, ctx: &Ctx) -> Option<Res> {
        self(ctx)
    }
}

/// A hook shared between pipelines.
///
/// Pipelines hold hooks by reference count, so the same hook can sit in
/// several pipelines (or several times in one) and identity can be checked
/// with [`Arc::ptr_eq`].
pub type SharedHook<Ctx, Res> = Arc<dyn Hook<Ctx, Res>>;

/// Wraps a closure as a [`SharedHook`].
///
/// ```rust
/// use hook_pipeline::{hook_fn, Hook, SharedHook};
///
/// let deny: SharedHook<String, u16> = hook_fn(|path: &String| {
///     path.starts_with("/admin").then_some(403)
/// });
/// assert_eq!(deny.invoke(&"/admin/users".to_string()), Some(403));
/// assert_eq!(deny.invoke(&"/".to_string()), None);
/// ```
pub fn hook_fn<Ctx, Res, F>(f: F) -> SharedHook<Ctx, Res>
where
    F: Fn(&Ctx) -> Option<Res> + Send + Sync + 'static,
{
    Arc::new(f)
}
