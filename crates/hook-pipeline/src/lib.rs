//! Ordered, short-circuiting hook pipelines.
//!
//! A [`HookPipeline`] holds an ordered list of hooks. Each hook looks at a
//! shared context and either produces a result or returns `None`. Invoking
//! the pipeline runs the hooks in order and stops at the first result.
//!
//! This is the shape of "before request" processing in a web framework: hooks
//! can answer a request early (a cached page, an authentication challenge)
//! and the framework only routes the request when every hook declined.
//!
//! # Building a Pipeline
//!
//! ```rust
//! use hook_pipeline::{hook_fn, HookPipeline};
//!
//! struct Request {
//!     path: String,
//!     authenticated: bool,
//! }
//!
//! let mut pipeline = HookPipeline::<Request, u16>::new();
//! pipeline.add_to_end(hook_fn(|req: &Request| (!req.authenticated).then_some(401)));
//! pipeline.add_to_end(hook_fn(|req: &Request| (req.path == "/gone").then_some(410)));
//!
//! let anonymous = Request { path: "/".into(), authenticated: false };
//! assert_eq!(pipeline.invoke(&anonymous), Some(401));
//!
//! let allowed = Request { path: "/".into(), authenticated: true };
//! assert_eq!(pipeline.invoke(&allowed), None);
//! ```
//!
//! # Positioning Hooks
//!
//! Hooks can be appended, prepended or inserted at an index. Inserting past
//! the end is an error and leaves the pipeline untouched:
//!
//! ```rust
//! use hook_pipeline::{hook_fn, HookPipeline, PipelineError, SharedHook};
//!
//! let first: SharedHook<(), ()> = hook_fn(|_: &()| None);
//! let mut pipeline = HookPipeline::new();
//! pipeline.add_to_end(hook_fn(|_: &()| None));
//! pipeline.add_to_start(first.clone());
//!
//! assert!(std::sync::Arc::ptr_eq(pipeline.items()[0].hook(), &first));
//! assert_eq!(
//!     pipeline.insert_at(5, hook_fn(|_: &()| None)),
//!     Err(PipelineError::IndexOutOfRange { index: 5, len: 2 })
//! );
//! ```
//!
//! # Named Hooks
//!
//! Entries can carry a name. Names are unique within a pipeline and can be
//! used as anchors:
//!
//! ```rust
//! use hook_pipeline::{hook_fn, HookPipeline, PipelineItem};
//!
//! let mut pipeline = HookPipeline::<(), ()>::new();
//! pipeline.add_to_end(PipelineItem::named("auth", hook_fn(|_: &()| None)));
//! pipeline.insert_before("auth", PipelineItem::named("cors", hook_fn(|_: &()| None)));
//! pipeline.insert_after("auth", PipelineItem::named("csrf", hook_fn(|_: &()| None)));
//!
//! let names: Vec<_> = pipeline.items().iter().filter_map(|i| i.name()).collect();
//! assert_eq!(names, ["cors", "auth", "csrf"]);
//! ```
//!
//! # Composition
//!
//! Pipelines concatenate, and a pipeline is itself a [`Hook`], so one can be
//! nested inside another. A nested pipeline that produces a result stops the
//! outer one as well; one that returns `None` lets the outer one continue.
//!
//! ```rust
//! use hook_pipeline::{hook_fn, HookPipeline};
//!
//! let mut security = HookPipeline::<u32, &'static str>::new();
//! security.add_to_end(hook_fn(|id: &u32| (*id == 0).then_some("forbidden")));
//!
//! let mut pipeline = HookPipeline::new();
//! pipeline.add_to_end(security);
//! pipeline.add_to_end(hook_fn(|id: &u32| (*id > 100).then_some("not found")));
//!
//! assert_eq!(pipeline.invoke(&0), Some("forbidden"));
//! assert_eq!(pipeline.invoke(&500), Some("not found"));
//! assert_eq!(pipeline.invoke(&7), None);
//! ```
//!
//! # Events
//!
//! Each invocation emits one [`PipelineEvent`]:
//!
//! - `ShortCircuited`: a hook produced a result
//! - `Completed`: every hook returned `None`
//!
//! # Feature Flags
//!
//! - `layer`: [`HookLayer`] for running a pipeline in front of a Tower service
//! - `tracing`: debug/trace output for short-circuits and completions
//! - `metrics`: `hook_pipeline_invocations_total` counter

mod config;
mod error;
mod events;
mod hook;
mod item;
#[cfg(feature = "layer")]
mod layer;
mod pipeline;

pub use config::HookPipelineBuilder;
pub use error::{PipelineError, Result};
pub use events::{PipelineEvent, PipelineListener};
pub use hook::{hook_fn, Hook, SharedHook};
pub use item::PipelineItem;
#[cfg(feature = "layer")]
pub use layer::{HookLayer, HookService};
pub use pipeline::HookPipeline;
