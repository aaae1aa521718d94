//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Own the route table and the middleware chain
//! - Resolve each request, then run it through the chain to the route handler
//! - Turn a miss into a 404 before any middleware runs
//!
//! # Design Decisions
//! - Built once at startup, then shared behind `Arc` and never mutated
//! - No locks on the request path; the table and chain are read-only
//! - A miss is a normal outcome, logged at warn and counted, not an error

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use std::time::Instant;

use crate::http::context::Context;
use crate::http::handler::Handler;
use crate::middleware::{Middleware, MiddlewareChain};
use crate::observability::metrics;
use crate::routing::error::{MatchError, RouterError};
use crate::routing::table::{RouteMatch, RouteTable};

/// Route table plus middleware chain.
#[derive(Debug, Default)]
pub struct Router {
    table: RouteTable,
    chain: Arc<MiddlewareChain>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route for `method`.
    pub fn route<H: Handler>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouterError> {
        self.table.register(method, pattern, handler)?;
        Ok(self)
    }

    pub fn get<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.route(Method::GET, pattern, handler)
    }

    pub fn post<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.route(Method::POST, pattern, handler)
    }

    pub fn put<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.route(Method::PUT, pattern, handler)
    }

    pub fn delete<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.route(Method::DELETE, pattern, handler)
    }

    /// Append a named middleware to the chain.
    pub fn middleware<M: Middleware>(&mut self, name: &str, middleware: M) -> Result<&mut Self, RouterError> {
        Arc::make_mut(&mut self.chain).register(name, middleware)?;
        Ok(self)
    }

    /// Resolve without dispatching.
    pub fn match_route(&self, method: &Method, path: &str) -> Result<RouteMatch<'_>, MatchError> {
        self.table.match_route(method, path)
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn chain(&self) -> &MiddlewareChain {
        &self.chain
    }

    /// Match, run the chain, run the handler.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let method = request.method().clone();
        let path = request.uri().path().to_string();

        let (endpoint, captures, pattern) = match self.table.match_route(&method, &path) {
            Ok(RouteMatch { route, captures }) => {
                (route.handler(), captures, route.pattern().to_string())
            }
            Err(miss) => {
                tracing::warn!(method = %method, path = %path, reason = %miss, "No route matched");
                metrics::record_request(method.as_str(), 404, "none", start);
                return not_found();
            }
        };

        tracing::debug!(method = %method, path = %path, pattern = %pattern, "Route matched");

        let mut ctx = Context::new(request);
        ctx.set_captures(captures);

        let response = self.chain.run(ctx, endpoint).await;
        metrics::record_request(method.as_str(), response.status().as_u16(), &pattern, start);
        response
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "No matching route found").into_response()
}
