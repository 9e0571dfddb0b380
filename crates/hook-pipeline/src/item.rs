//! Pipeline entries.

use crate::{HookPipeline, SharedHook};
use std::fmt;
use std::sync::Arc;

/// One entry of a [`HookPipeline`]: a shared hook and an optional name.
///
/// Named entries are unique within a pipeline. Adding an entry whose name is
/// already present removes the existing one first. Unnamed entries (and
/// entries with an empty name) are never deduplicated.
pub struct PipelineItem<Ctx, Res> {
    name: Option<String>,
    hook: SharedHook<Ctx, Res>,
}

impl<Ctx, Res> PipelineItem<Ctx, Res> {
    /// Creates an unnamed entry.
    pub fn new(hook: SharedHook<Ctx, Res>) -> Self {
        Self { name: None, hook }
    }

    /// Creates a named entry.
    pub fn named(name: impl Into<String>, hook: SharedHook<Ctx, Res>) -> Self {
        Self {
            name: Some(name.into()),
            hook,
        }
    }

    /// Returns the entry name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the hook held by this entry.
    pub fn hook(&self) -> &SharedHook<Ctx, Res> {
        &self.hook
    }

    /// Consumes the entry, returning its hook.
    pub fn into_hook(self) -> SharedHook<Ctx, Res> {
        self.hook
    }

    /// Returns true if this entry can be matched by `name`.
    pub(crate) fn has_name(&self, name: &str) -> bool {
        !name.is_empty() && self.name.as_deref() == Some(name)
    }

    /// Returns the name used for deduplication, if any.
    pub(crate) fn match_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

impl<Ctx, Res> Clone for PipelineItem<Ctx, Res> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            hook: Arc::clone(&self.hook),
        }
    }
}

impl<Ctx, Res> fmt::Debug for PipelineItem<Ctx, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineItem")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<Ctx, Res> From<SharedHook<Ctx, Res>> for PipelineItem<Ctx, Res> {
    fn from(hook: SharedHook<Ctx, Res>) -> Self {
        Self::new(hook)
    }
}

impl<Ctx, Res> From<HookPipeline<Ctx, Res>> for PipelineItem<Ctx, Res>
where
    Ctx: 'static,
    Res: 'static,
{
    fn from(pipeline: HookPipeline<Ctx, Res>) -> Self {
        Self::new(pipeline.into_hook())
    }
}
