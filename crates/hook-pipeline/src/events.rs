//! Events emitted by hook pipelines.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

/// Events emitted once per pipeline invocation.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// A hook produced a result and stopped the pipeline.
    ///
    /// `index` is the slot in *this* pipeline. When the hook is a nested
    /// pipeline, `index` is the slot the nested pipeline occupies; the nested
    /// pipeline reports its own `ShortCircuited` event first, so one
    /// short-circuit shows up in the events of every enclosing pipeline.
    ShortCircuited {
        /// Name of the pipeline.
        pipeline_name: String,
        /// When the event occurred.
        timestamp: Instant,
        /// Position of the hook that produced the result.
        index: usize,
    },

    /// Every hook returned `None`.
    Completed {
        /// Name of the pipeline.
        pipeline_name: String,
        /// When the event occurred.
        timestamp: Instant,
        /// Number of hooks that ran.
        hooks_invoked: usize,
    },
}

impl PipelineEvent {
    /// Returns `"short_circuited"` or `"completed"`.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ShortCircuited { .. } => "short_circuited",
            Self::Completed { .. } => "completed",
        }
    }

    /// Returns when this event occurred.
    pub fn timestamp(&self) -> Instant {
        match self {
            Self::ShortCircuited { timestamp, .. } | Self::Completed { timestamp, .. } => {
                *timestamp
            }
        }
    }

    /// Returns the name of the pipeline that emitted this event.
    pub fn pipeline_name(&self) -> &str {
        match self {
            Self::ShortCircuited { pipeline_name, .. } | Self::Completed { pipeline_name, .. } => {
                pipeline_name
            }
        }
    }

    /// Returns true if a hook produced a result.
    pub fn is_short_circuit(&self) -> bool {
        matches!(self, Self::ShortCircuited { .. })
    }
}

/// A callback observing pipeline events.
pub type PipelineListener = Arc<dyn Fn(&PipelineEvent) + Send + Sync>;

/// The listeners attached to one pipeline.
///
/// Clones share the callbacks but not the list: registering on a clone
/// leaves the original alone.
#[derive(Clone, Default)]
pub(crate) struct PipelineListeners {
    callbacks: Vec<PipelineListener>,
}

impl PipelineListeners {
    pub(crate) fn register(&mut self, listener: PipelineListener) {
        self.callbacks.push(listener);
    }

    /// Builds the event only when someone is listening, then hands it to
    /// each callback in registration order. A panicking callback is skipped
    /// over; it never reaches the pipeline caller.
    pub(crate) fn notify(&self, event: impl FnOnce() -> PipelineEvent) {
        if self.callbacks.is_empty() {
            return;
        }
        let event = event();
        for callback in &self.callbacks {
            if catch_unwind(AssertUnwindSafe(|| callback(&event))).is_err() {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    pipeline = %event.pipeline_name(),
                    "Pipeline event listener panicked"
                );
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }
}

impl fmt::Debug for PipelineListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} listener(s)", self.len())
    }
}
