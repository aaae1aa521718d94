//! Request logging middleware.

use axum::response::Response;
use std::time::Instant;

use crate::http::context::Context;
use crate::middleware::chain::Next;

/// Log one line per request once the rest of the chain has answered.
pub async fn request_log(ctx: Context, next: Next) -> Response {
    let start = Instant::now();
    let request_id = ctx.request_id().to_string();
    let method = ctx.method().clone();
    let path = ctx.path().to_string();

    let response = next.run(ctx).await;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request handled"
    );
    response
}
