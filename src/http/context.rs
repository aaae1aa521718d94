//! Per-request context threaded through the middleware chain.
//!
//! # Responsibilities
//! - Own the incoming request (method, path, headers, body)
//! - Expose captures produced by the matcher
//! - Carry one swappable resource (e.g. the active backing store)
//!
//! # Design Decisions
//! - Created once per request and moved from stage to stage, never shared
//! - Request metadata is read-only; only captures and the resource slot change
//! - The resource slot is type-erased; readers ask for a concrete type

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request};
use std::any::Any;
use std::sync::Arc;
use uuid::Uuid;

use crate::routing::Captures;

/// Header carrying the correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Type-erased handle stored in the resource slot.
pub type Resource = Arc<dyn Any + Send + Sync>;

/// Mutable per-request state.
pub struct Context {
    request: Request<Body>,
    request_id: String,
    captures: Captures,
    resource: Option<Resource>,
}

impl Context {
    /// Wrap an incoming request. The request ID is taken from `x-request-id`
    /// when present, otherwise a fresh UUID v4 is assigned.
    pub fn new(request: Request<Body>) -> Self {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            request,
            request_id,
            captures: Captures::default(),
            resource: None,
        }
    }

    pub fn method(&self) -> &Method {
        self.request.method()
    }

    /// Raw request path, without the query string.
    pub fn path(&self) -> &str {
        self.request.uri().path()
    }

    pub fn query(&self) -> Option<&str> {
        self.request.uri().query()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Captured value for `name`, or `None` if the matched pattern has no such segment.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.captures.get(name)
    }

    pub fn params(&self) -> &Captures {
        &self.captures
    }

    pub(crate) fn set_captures(&mut self, captures: Captures) {
        self.captures = captures;
    }

    /// Replace the resource slot for the rest of this request.
    pub fn set_resource<T: Any + Send + Sync>(&mut self, resource: Arc<T>) {
        self.resource = Some(resource);
    }

    /// The resource slot, if it holds a `T`.
    pub fn resource<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.resource.clone()?.downcast::<T>().ok()
    }

    pub fn clear_resource(&mut self) -> Option<Resource> {
        self.resource.take()
    }

    /// Take the request body, leaving an empty one behind.
    pub fn take_body(&mut self) -> Body {
        std::mem::take(self.request.body_mut())
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("method", self.method())
            .field("path", &self.path())
            .field("request_id", &self.request_id)
            .field("captures", &self.captures)
            .field("has_resource", &self.resource.is_some())
            .finish()
    }
}
