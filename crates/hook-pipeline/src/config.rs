//! Builder for named, observable pipelines.

use crate::pipeline::DEFAULT_NAME;
use crate::events::PipelineListeners;
use crate::{HookPipeline, PipelineEvent, PipelineItem};
use std::sync::Arc;

/// Builder for constructing a [`HookPipeline`].
pub struct HookPipelineBuilder<Ctx, Res> {
    name: String,
    items: Vec<PipelineItem<Ctx, Res>>,
    listeners: PipelineListeners,
}

impl<Ctx, Res> Default for HookPipelineBuilder<Ctx, Res> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx, Res> HookPipelineBuilder<Ctx, Res> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            items: Vec::new(),
            listeners: PipelineListeners::default(),
        }
    }

    /// Sets the name for this pipeline (used in metrics, traces and events).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Appends an entry. Named entries replace earlier ones with the same
    /// name, exactly as [`HookPipeline::add_to_end`] does.
    pub fn hook(mut self, item: impl Into<PipelineItem<Ctx, Res>>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Adds an event listener.
    pub fn on_event<F>(mut self, listener: F) -> Self
    where
        F: Fn(&PipelineEvent) + Send + Sync + 'static,
    {
        self.listeners.register(Arc::new(listener));
        self
    }

    /// Builds the pipeline.
    pub fn build(self) -> HookPipeline<Ctx, Res> {
        HookPipeline::from_parts(self.name, self.items, self.listeners)
    }
}
