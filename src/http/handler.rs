//! Terminal route handlers.

use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

use crate::http::context::Context;

/// The route-specific function invoked once the middleware chain has fully continued.
///
/// Implemented for any `Fn(Context) -> impl Future<Output = impl IntoResponse>`,
/// so plain `async fn handler(ctx: Context) -> Response` works.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, ctx: Context) -> BoxFuture<'static, Response>;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn call(&self, ctx: Context) -> BoxFuture<'static, Response> {
        let fut = self(ctx);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Shared handler reference stored in the route table.
pub type BoxHandler = Arc<dyn Handler>;
