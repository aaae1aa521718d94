//! Registration and lookup errors.

use axum::http::Method;
use thiserror::Error;

use crate::routing::pattern::PatternError;

/// Errors returned while building a [`Router`](crate::routing::Router).
///
/// Both variants reject only the offending registration; everything
/// registered before it stays in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The route pattern could not be parsed.
    #[error("invalid route pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },

    /// A middleware with this name is already in the chain.
    #[error("middleware `{0}` is already registered")]
    DuplicateMiddleware(String),
}

/// Outcome of a lookup that found no route.
///
/// This is an expected, per-request result rather than a failure of the router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Nothing at all is registered for the method.
    #[error("no routes registered for {method}")]
    NoMatchForMethod { method: Method },

    /// Routes exist for the method but none matched the path.
    #[error("no route matches {method} {path}")]
    NotFound { method: Method, path: String },
}

impl MatchError {
    /// The request method that missed.
    pub fn method(&self) -> &Method {
        match self {
            MatchError::NoMatchForMethod { method } | MatchError::NotFound { method, .. } => method,
        }
    }
}
