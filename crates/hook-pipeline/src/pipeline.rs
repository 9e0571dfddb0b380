//! The pipeline itself.

use crate::config::HookPipelineBuilder;
use crate::error::{PipelineError, Result};
use crate::events::PipelineListeners;
use crate::{Hook, PipelineEvent, PipelineItem, SharedHook};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "metrics")]
use metrics::{counter, describe_counter};

#[cfg(feature = "metrics")]
use std::sync::Once;

#[cfg(feature = "metrics")]
static METRICS_INIT: Once = Once::new();

pub(crate) const DEFAULT_NAME: &str = "pipeline";

/// An ordered, mutable chain of short-circuiting hooks.
///
/// See the [crate-level documentation](crate) for usage examples.
pub struct HookPipeline<Ctx, Res> {
    name: String,
    items: Vec<PipelineItem<Ctx, Res>>,
    listeners: PipelineListeners,
}

impl<Ctx, Res> HookPipeline<Ctx, Res> {
    /// Creates an empty pipeline named `"pipeline"`.
    pub fn new() -> Self {
        Self::from_parts(DEFAULT_NAME.to_string(), Vec::new(), PipelineListeners::default())
    }

    /// Creates a new builder for configuring a pipeline.
    pub fn builder() -> HookPipelineBuilder<Ctx, Res> {
        HookPipelineBuilder::new()
    }

    /// Creates a pipeline whose only entry is `item`.
    pub fn from_hook(item: impl Into<PipelineItem<Ctx, Res>>) -> Self {
        let mut pipeline = Self::new();
        pipeline.add_to_end(item);
        pipeline
    }

    pub(crate) fn from_parts(
        name: String,
        items: Vec<PipelineItem<Ctx, Res>>,
        listeners: PipelineListeners,
    ) -> Self {
        #[cfg(feature = "metrics")]
        METRICS_INIT.call_once(|| {
            describe_counter!(
                "hook_pipeline_invocations_total",
                "Total number of hook pipeline invocations"
            );
        });

        let mut pipeline = Self {
            name,
            items: Vec::with_capacity(items.len()),
            listeners,
        };
        for item in items {
            pipeline.add_to_end(item);
        }
        pipeline
    }

    /// Returns the pipeline name used in events, traces and metrics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the entries in invocation order.
    pub fn items(&self) -> &[PipelineItem<Ctx, Res>] {
        &self.items
    }

    /// Returns the hooks in invocation order.
    pub fn hooks(&self) -> impl Iterator<Item = &SharedHook<Ctx, Res>> {
        self.items.iter().map(PipelineItem::hook)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the pipeline has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the position of the entry called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.has_name(name))
    }

    /// Appends an entry.
    pub fn add_to_end(&mut self, item: impl Into<PipelineItem<Ctx, Res>>) {
        self.push_item(item.into(), false);
    }

    /// Appends an entry, or puts it in the slot of an existing entry with
    /// the same name.
    pub fn add_to_end_in_place(&mut self, item: impl Into<PipelineItem<Ctx, Res>>) {
        self.push_item(item.into(), true);
    }

    /// Prepends an entry.
    pub fn add_to_start(&mut self, item: impl Into<PipelineItem<Ctx, Res>>) {
        self.unshift_item(item.into(), false);
    }

    /// Prepends an entry, or puts it in the slot of an existing entry with
    /// the same name.
    pub fn add_to_start_in_place(&mut self, item: impl Into<PipelineItem<Ctx, Res>>) {
        self.unshift_item(item.into(), true);
    }

    /// Inserts an entry so it ends up at `index`, shifting later entries
    /// right.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::IndexOutOfRange`] if `index > len()`. The
    /// pipeline is left unchanged.
    pub fn insert_at(
        &mut self,
        index: usize,
        item: impl Into<PipelineItem<Ctx, Res>>,
    ) -> Result<()> {
        self.insert_item(index, item.into(), false)
    }

    /// Like [`insert_at`](Self::insert_at), but an existing entry with the
    /// same name keeps its slot for the new entry.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::IndexOutOfRange`] if `index > len()`.
    pub fn insert_at_in_place(
        &mut self,
        index: usize,
        item: impl Into<PipelineItem<Ctx, Res>>,
    ) -> Result<()> {
        self.insert_item(index, item.into(), true)
    }

    /// Inserts an entry directly before the entry called `name`, or at the
    /// start if there is no such entry.
    ///
    /// An entry anchored on its own name stays in its current slot.
    pub fn insert_before(&mut self, name: &str, item: impl Into<PipelineItem<Ctx, Res>>) {
        let item = item.into();
        let anchor = self.position(name);
        let removed = self.remove_same_name(&item);
        let index = match (anchor, removed) {
            (Some(anchor), Some(removed)) if removed < anchor => anchor - 1,
            (Some(anchor), _) => anchor,
            (None, _) => 0,
        };
        self.items.insert(index, item);
    }

    /// Inserts an entry directly after the entry called `name`, or at the
    /// end if there is no such entry.
    ///
    /// An entry anchored on its own name stays in its current slot.
    pub fn insert_after(&mut self, name: &str, item: impl Into<PipelineItem<Ctx, Res>>) {
        let item = item.into();
        let anchor = self.position(name);
        let removed = self.remove_same_name(&item);
        let index = match (anchor, removed) {
            (Some(anchor), Some(removed)) if removed <= anchor => anchor,
            (Some(anchor), _) => anchor + 1,
            (None, _) => self.items.len(),
        };
        self.items.insert(index, item);
    }

    /// Removes the entry called `name`, returning its former position.
    pub fn remove_by_name(&mut self, name: &str) -> Option<usize> {
        let index = self.position(name)?;
        self.items.remove(index);
        Some(index)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Appends all entries of `other`, in order. `other` is left untouched;
    /// the hooks are shared, not moved.
    pub fn concat(&mut self, other: &HookPipeline<Ctx, Res>) {
        self.items.reserve(other.items.len());
        for item in &other.items {
            self.push_item(item.clone(), false);
        }
    }

    /// Appends a single entry. Same as [`add_to_end`](Self::add_to_end).
    pub fn concat_hook(&mut self, item: impl Into<PipelineItem<Ctx, Res>>) {
        self.add_to_end(item);
    }

    /// Runs the hooks in order until one produces a result.
    ///
    /// Returns that result, or `None` if every hook returned `None`. Hooks
    /// after the one that produced a result are not run. A panic in a hook
    /// propagates to the caller.
    pub fn invoke(&self, ctx: &Ctx) -> Option<Res> {
        for (index, item) in self.items.iter().enumerate() {
            if let Some(result) = item.hook().invoke(ctx) {
                #[cfg(feature = "tracing")]
                tracing::debug!(pipeline = %self.name, index, "Hook short-circuited pipeline");

                #[cfg(feature = "metrics")]
                counter!(
                    "hook_pipeline_invocations_total",
                    "pipeline" => self.name.clone(),
                    "result" => "short_circuited"
                )
                .increment(1);

                self.listeners.notify(|| PipelineEvent::ShortCircuited {
                    pipeline_name: self.name.clone(),
                    timestamp: Instant::now(),
                    index,
                });

                return Some(result);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            pipeline = %self.name,
            hooks = self.items.len(),
            "Pipeline completed without a result"
        );

        #[cfg(feature = "metrics")]
        counter!(
            "hook_pipeline_invocations_total",
            "pipeline" => self.name.clone(),
            "result" => "completed"
        )
        .increment(1);

        self.listeners.notify(|| PipelineEvent::Completed {
            pipeline_name: self.name.clone(),
            timestamp: Instant::now(),
            hooks_invoked: self.items.len(),
        });

        None
    }

    /// Turns the pipeline into a single shared hook, ready to be added to
    /// another pipeline.
    pub fn into_hook(self) -> SharedHook<Ctx, Res>
    where
        Ctx: 'static,
        Res: 'static,
    {
        Arc::new(self)
    }

    /// Turns the pipeline into a plain closure equivalent to
    /// [`invoke`](Self::invoke).
    pub fn into_fn(self) -> impl Fn(&Ctx) -> Option<Res> + Send + Sync {
        move |ctx: &Ctx| self.invoke(ctx)
    }

    fn push_item(&mut self, item: PipelineItem<Ctx, Res>, replace_in_place: bool) {
        match self.remove_same_name(&item) {
            Some(existing) if replace_in_place => self.items.insert(existing, item),
            _ => self.items.push(item),
        }
    }

    fn unshift_item(&mut self, item: PipelineItem<Ctx, Res>, replace_in_place: bool) {
        match self.remove_same_name(&item) {
            Some(existing) if replace_in_place => self.items.insert(existing, item),
            _ => self.items.insert(0, item),
        }
    }

    fn insert_item(
        &mut self,
        index: usize,
        item: PipelineItem<Ctx, Res>,
        replace_in_place: bool,
    ) -> Result<()> {
        if index > self.items.len() {
            return Err(PipelineError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let index = match self.remove_same_name(&item) {
            Some(existing) if replace_in_place => existing,
            // Removing a duplicate can shorten the pipeline by one.
            _ => index.min(self.items.len()),
        };
        self.items.insert(index, item);
        Ok(())
    }

    fn remove_same_name(&mut self, item: &PipelineItem<Ctx, Res>) -> Option<usize> {
        let name = item.match_name()?;
        let index = self.position(name)?;
        self.items.remove(index);
        Some(index)
    }
}

impl<Ctx, Res> Hook<Ctx, Res> for HookPipeline<Ctx, Res> {
    fn invoke(&self, ctx: &Ctx) -> Option<Res> {
        HookPipeline::invoke(self, ctx)
    }
}

impl<Ctx, Res> Default for HookPipeline<Ctx, Res> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx, Res> Clone for HookPipeline<Ctx, Res> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            items: self.items.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<Ctx, Res> fmt::Debug for HookPipeline<Ctx, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookPipeline")
            .field("name", &self.name)
            .field("items", &self.items)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<Ctx, Res> From<SharedHook<Ctx, Res>> for HookPipeline<Ctx, Res> {
    fn from(hook: SharedHook<Ctx, Res>) -> Self {
        Self::from_hook(hook)
    }
}

impl<Ctx, Res> From<PipelineItem<Ctx, Res>> for HookPipeline<Ctx, Res> {
    fn from(item: PipelineItem<Ctx, Res>) -> Self {
        Self::from_hook(item)
    }
}
