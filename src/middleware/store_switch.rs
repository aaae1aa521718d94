//! Picks the backing store for a request by path prefix and places it in the context.

use arc_swap::ArcSwap;
use axum::response::Response;
use futures_util::future::BoxFuture;
use std::sync::Arc;

use crate::config::schema::StoreConfig;
use crate::http::context::Context;
use crate::middleware::chain::{Middleware, Next};
use crate::routing::pattern::has_path_prefix;
use crate::store::{MemoryStore, StoreRegistry};

/// Longest-prefix store selection, falling back to the configured default.
#[derive(Clone)]
pub struct StoreSwitch {
    registry: StoreRegistry,
    config: Arc<ArcSwap<StoreConfig>>,
}

impl StoreSwitch {
    pub fn new(registry: StoreRegistry, config: StoreConfig) -> Self {
        Self {
            registry,
            config: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Swap in new mounts; stores named for the first time are created.
    pub fn update(&self, config: StoreConfig) {
        for name in &config.names {
            self.registry.ensure(name);
        }
        tracing::info!(mounts = config.mounts.len(), default = ?config.default, "Store mounts updated");
        self.config.store(Arc::new(config));
    }

    /// Store selected for `path`, if any.
    pub fn select(&self, path: &str) -> Option<Arc<MemoryStore>> {
        let config = self.config.load();
        let name = config
            .mounts
            .iter()
            .filter(|mount| has_path_prefix(path, &mount.prefix))
            .max_by_key(|mount| mount.prefix.len())
            .map(|mount| &mount.store)
            .or(config.default.as_ref())?;
        self.registry.get(name)
    }

    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }
}

impl Middleware for StoreSwitch {
    fn handle(&self, mut ctx: Context, next: Next) -> BoxFuture<'static, Response> {
        match self.select(ctx.path()) {
            Some(store) => {
                tracing::debug!(request_id = %ctx.request_id(), store = %store.name(), "Store selected");
                ctx.set_resource(store);
            }
            None => tracing::debug!(request_id = %ctx.request_id(), "No store for path"),
        }
        next.run(ctx)
    }
}
