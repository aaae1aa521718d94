//! Ordered middleware chain with explicit continuation.
//!
//! # Data Flow
//! ```text
//! chain.run(ctx, endpoint)
//!     → middleware[0].handle(ctx, Next@1)
//!         → next.run(ctx) → middleware[1].handle(ctx, Next@2)
//!             → ... → endpoint.call(ctx)
//! ```
//!
//! A middleware that returns without calling `next.run` ends the request
//! there; later stages and the endpoint never see it.

use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::http::context::Context;
use crate::http::handler::BoxHandler;
use crate::routing::error::RouterError;

/// A named pre-processing stage.
///
/// Implemented for `Fn(Context, Next) -> impl Future<Output = impl IntoResponse>`.
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, ctx: Context, next: Next) -> BoxFuture<'static, Response>;
}

impl<F, Fut, R> Middleware for F
where
    F: Fn(Context, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn handle(&self, ctx: Context, next: Next) -> BoxFuture<'static, Response> {
        let fut = self(ctx, next);
        Box::pin(async move { fut.await.into_response() })
    }
}

#[derive(Clone)]
struct Link {
    name: String,
    middleware: Arc<dyn Middleware>,
}

/// Middleware in registration order.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    links: Vec<Link>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a middleware. Names are unique; a duplicate is rejected and the
    /// existing entry stays where it is.
    pub fn register<M: Middleware>(&mut self, name: &str, middleware: M) -> Result<(), RouterError> {
        if self.contains(name) {
            return Err(RouterError::DuplicateMiddleware(name.to_string()));
        }
        tracing::debug!(middleware = %name, position = self.links.len(), "Middleware registered");
        self.links.push(Link {
            name: name.to_string(),
            middleware: Arc::new(middleware),
        });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.links.iter().any(|link| link.name == name)
    }

    /// Names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|link| link.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Run `ctx` through every stage, ending in `endpoint`.
    pub fn run(self: &Arc<Self>, ctx: Context, endpoint: BoxHandler) -> BoxFuture<'static, Response> {
        Next {
            chain: Arc::clone(self),
            position: 0,
            endpoint,
        }
        .run(ctx)
    }
}

impl fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Continuation token handed to each middleware.
///
/// Consumed by [`Next::run`], so a stage can continue at most once.
pub struct Next {
    chain: Arc<MiddlewareChain>,
    position: usize,
    endpoint: BoxHandler,
}

impl Next {
    /// Hand `ctx` to the next stage, or to the endpoint if the chain is exhausted.
    pub fn run(self, ctx: Context) -> BoxFuture<'static, Response> {
        let Some(link) = self.chain.links.get(self.position).cloned() else {
            return self.endpoint.call(ctx);
        };

        tracing::trace!(middleware = %link.name, position = self.position, "Entering middleware");
        let next = Next {
            position: self.position + 1,
            ..self
        };
        link.middleware.handle(ctx, next)
    }

    /// Name of the stage this token would run next, if any.
    pub fn peek(&self) -> Option<&str> {
        self.chain.links.get(self.position).map(|link| link.name.as_str())
    }
}
