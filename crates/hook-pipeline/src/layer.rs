//! Tower layer that runs a pipeline in front of a service.
//!
//! This is how a pipeline plugs into request processing: the request is the
//! pipeline context, a hook result becomes the response, and `None` lets the
//! request through to the wrapped service.

use crate::HookPipeline;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;
use tower::layer::Layer;

/// A Tower layer that runs a [`HookPipeline`] before the inner service.
pub struct HookLayer<Ctx, Res> {
    pipeline: Arc<HookPipeline<Ctx, Res>>,
}

impl<Ctx, Res> HookLayer<Ctx, Res> {
    /// Creates a layer that owns `pipeline`.
    pub fn new(pipeline: HookPipeline<Ctx, Res>) -> Self {
        Self::shared(Arc::new(pipeline))
    }

    /// Creates a layer from a pipeline that is shared elsewhere.
    pub fn shared(pipeline: Arc<HookPipeline<Ctx, Res>>) -> Self {
        Self { pipeline }
    }

    /// Returns the pipeline run by this layer.
    pub fn pipeline(&self) -> &HookPipeline<Ctx, Res> {
        &self.pipeline
    }
}

impl<Ctx, Res> Clone for HookLayer<Ctx, Res> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

impl<S, Ctx, Res> Layer<S> for HookLayer<Ctx, Res> {
    type Service = HookService<S, Ctx, Res>;

    fn layer(&self, service: S) -> Self::Service {
        HookService::new(service, Arc::clone(&self.pipeline))
    }
}

/// A Tower service that short-circuits requests when its pipeline produces
/// a response.
///
/// Readiness and errors are those of the inner service.
pub struct HookService<S, Ctx, Res> {
    inner: S,
    pipeline: Arc<HookPipeline<Ctx, Res>>,
}

impl<S, Ctx, Res> HookService<S, Ctx, Res> {
    /// Creates a new `HookService` wrapping the given service.
    pub fn new(inner: S, pipeline: Arc<HookPipeline<Ctx, Res>>) -> Self {
        Self { inner, pipeline }
    }

    /// Returns a reference to the inner service.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Consumes this service, returning the inner service.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, Ctx, Res> Clone for HookService<S, Ctx, Res>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

impl<S, Ctx, Res> Service<Ctx> for HookService<S, Ctx, Res>
where
    S: Service<Ctx, Response = Res>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    Res: Send + 'static,
{
    type Response = Res;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Ctx) -> Self::Future {
        if let Some(response) = self.pipeline.invoke(&req) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                pipeline = %self.pipeline.name(),
                "Pipeline produced a response, skipping inner service"
            );

            return Box::pin(futures::future::ready(Ok(response)));
        }

        Box::pin(self.inner.call(req))
    }
}
