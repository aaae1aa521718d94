//! Stock application: built-in middleware plus an item resource served from
//! whichever backing store the store switch selected.
//!
//! # Routes
//! ```text
//! GET    /                              service info
//! GET    /stores                        declared store names
//! GET    /items/:id[\d+]                read from the default store
//! PUT    /items/:id[\d+]                write to the default store
//! DELETE /items/:id[\d+]                delete from the default store
//! GET    /:mount/items/:id[\d+]         same, store chosen by mount prefix
//! PUT    /:mount/items/:id[\d+]
//! DELETE /:mount/items/:id[\d+]
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::config::RouterConfig;
use crate::http::context::Context;
use crate::middleware::{request_log, AccessControl, StoreSwitch};
use crate::routing::{Router, RouterError};
use crate::store::{MemoryStore, StoreRegistry};

const ITEM: &str = r"/items/:id[\d+]";
const MOUNTED_ITEM: &str = r"/:mount/items/:id[\d+]";

/// Handles that stay live after the router is frozen; the config watcher
/// pushes reloads through them.
#[derive(Clone)]
pub struct Services {
    pub stores: StoreRegistry,
    pub access: AccessControl,
    pub store_switch: StoreSwitch,
}

/// Build the stock router from `config`.
pub fn build(config: &RouterConfig) -> Result<(Router, Services), RouterError> {
    let stores = StoreRegistry::with_names(&config.stores.names);
    let access = AccessControl::new(config.access.rules.clone());
    let store_switch = StoreSwitch::new(stores.clone(), config.stores.clone());

    let mut router = Router::new();
    router
        .middleware("request_log", request_log)?
        .middleware("access_control", access.clone())?
        .middleware("store_switch", store_switch.clone())?;

    let registry = stores.clone();
    router
        .get("/", index)?
        .get("/stores", move |_ctx: Context| {
            let names = registry.names();
            async move { Json(json!({ "stores": names })) }
        })?;

    for pattern in [ITEM, MOUNTED_ITEM] {
        router
            .get(pattern, get_item)?
            .put(pattern, put_item)?
            .delete(pattern, delete_item)?;
    }

    tracing::info!(
        routes = router.table().len(),
        middleware = router.chain().len(),
        "Router built"
    );

    Ok((
        router,
        Services {
            stores,
            access,
            store_switch,
        },
    ))
}

async fn index(_ctx: Context) -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn selected_store(ctx: &Context) -> Result<Arc<MemoryStore>, Response> {
    ctx.resource::<MemoryStore>()
        .ok_or_else(|| (StatusCode::SERVICE_UNAVAILABLE, "No backing store selected").into_response())
}

async fn get_item(ctx: Context) -> Response {
    let store = match selected_store(&ctx) {
        Ok(store) => store,
        Err(response) => return response,
    };
    let id = ctx.param("id").unwrap_or_default();

    match store.get(id) {
        Some(document) => Json(json!({
            "id": id,
            "store": store.name(),
            "document": document,
        }))
        .into_response(),
        None => (StatusCode::NOT_FOUND, "Item not found").into_response(),
    }
}

async fn put_item(mut ctx: Context) -> Response {
    let store = match selected_store(&ctx) {
        Ok(store) => store,
        Err(response) => return response,
    };

    let bytes = match axum::body::to_bytes(ctx.take_body(), usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %ctx.request_id(), error = %e, "Failed to read body");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body rejected").into_response();
        }
    };
    let document: Value = match serde_json::from_slice(&bytes) {
        Ok(document) => document,
        Err(_) => return (StatusCode::BAD_REQUEST, "Body must be JSON").into_response(),
    };

    let id = ctx.param("id").unwrap_or_default();
    let status = match store.put(id, document) {
        None => StatusCode::CREATED,
        Some(_) => StatusCode::OK,
    };
    (status, Json(json!({ "id": id, "store": store.name() }))).into_response()
}

async fn delete_item(ctx: Context) -> Response {
    let store = match selected_store(&ctx) {
        Ok(store) => store,
        Err(response) => return response,
    };
    match store.remove(ctx.param("id").unwrap_or_default()) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => (StatusCode::NOT_FOUND, "Item not found").into_response(),
    }
}
