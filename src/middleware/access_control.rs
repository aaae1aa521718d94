//! Access Control Middleware.
//! Enforces bearer keys on configured path prefixes.

use arc_swap::ArcSwap;
use axum::http::{header::AUTHORIZATION, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use std::sync::Arc;

use crate::config::schema::AccessRule;
use crate::http::context::Context;
use crate::middleware::chain::{Middleware, Next};
use crate::observability::metrics;
use crate::routing::pattern::has_path_prefix;

/// Prefix-scoped bearer-key check.
///
/// Rules are swapped atomically on config reload; clones share the same rules.
#[derive(Clone)]
pub struct AccessControl {
    rules: Arc<ArcSwap<Vec<AccessRule>>>,
}

impl AccessControl {
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self {
            rules: Arc::new(ArcSwap::from_pointee(rules)),
        }
    }

    /// Replace the active rule set.
    pub fn update(&self, rules: Vec<AccessRule>) {
        tracing::info!(rules = rules.len(), "Access rules updated");
        self.rules.store(Arc::new(rules));
    }

    /// The `Authorization` value required for `path`, if any.
    /// When several rules cover the path, the longest prefix applies.
    pub fn required_credential(&self, path: &str) -> Option<String> {
        self.rules
            .load()
            .iter()
            .filter(|rule| has_path_prefix(path, &rule.prefix))
            .max_by_key(|rule| rule.prefix.len())
            .map(|rule| format!("Bearer {}", rule.api_key))
    }
}

impl Middleware for AccessControl {
    fn handle(&self, ctx: Context, next: Next) -> BoxFuture<'static, Response> {
        let Some(expected) = self.required_credential(ctx.path()) else {
            return next.run(ctx);
        };

        let presented = ctx
            .headers()
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        if presented == Some(expected.as_str()) {
            return next.run(ctx);
        }

        tracing::warn!(
            request_id = %ctx.request_id(),
            path = %ctx.path(),
            credentials = presented.is_some(),
            "Access denied"
        );
        metrics::record_short_circuit("access_control");
        Box::pin(async { (StatusCode::UNAUTHORIZED, "Missing or invalid credentials").into_response() })
    }
}
