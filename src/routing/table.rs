//! Route storage and lookup.
//!
//! # Responsibilities
//! - Store routes per method in registration order
//! - Resolve (method, path) to the first route whose pattern matches
//! - Distinguish "nothing for this method" from "nothing for this path"
//!
//! # Design Decisions
//! - Linear, first-match scan; specificity plays no part
//! - Duplicate registrations are accepted; the earlier one shadows the later
//! - Path is split once per lookup, not once per candidate

use axum::http::Method;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::http::handler::{BoxHandler, Handler};
use crate::routing::error::{MatchError, RouterError};
use crate::routing::pattern::{split_path, Captures, RoutePattern};

/// A registered route. Immutable once in the table.
pub struct Route {
    method: Method,
    pattern: RoutePattern,
    handler: BoxHandler,
}

impl Route {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub(crate) fn handler(&self) -> BoxHandler {
        Arc::clone(&self.handler)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// A successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub captures: Captures,
}

/// Method → ordered routes.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<Method, Vec<Route>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `pattern` and append a route for `method`.
    pub fn register<H: Handler>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<(), RouterError> {
        let parsed = RoutePattern::parse(pattern).map_err(|source| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        tracing::debug!(method = %method, pattern = %parsed, "Route registered");

        self.routes.entry(method.clone()).or_default().push(Route {
            method,
            pattern: parsed,
            handler: Arc::new(handler),
        });
        Ok(())
    }

    /// Find the first route registered for `method` that matches `path`.
    pub fn match_route(&self, method: &Method, path: &str) -> Result<RouteMatch<'_>, MatchError> {
        let routes = match self.routes.get(method) {
            Some(routes) if !routes.is_empty() => routes,
            _ => {
                return Err(MatchError::NoMatchForMethod {
                    method: method.clone(),
                })
            }
        };

        let parts = split_path(path);
        routes
            .iter()
            .find_map(|route| {
                route
                    .pattern
                    .match_segments(&parts)
                    .map(|captures| RouteMatch { route, captures })
            })
            .ok_or_else(|| MatchError::NotFound {
                method: method.clone(),
                path: path.to_string(),
            })
    }

    /// Routes for `method`, in registration order.
    pub fn routes_for(&self, method: &Method) -> &[Route] {
        self.routes.get(method).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of routes across all methods.
    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
