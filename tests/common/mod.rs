//! Shared helpers for integration tests.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use route_chain::config::RouterConfig;
use route_chain::{app, HttpServer};
use serde_json::Value;
use tower::ServiceExt;

/// Build the stock app for `config`, ready to drive with `send`.
pub fn stock_app(config: RouterConfig) -> Router {
    let (router, _services) = app::build(&config).unwrap();
    HttpServer::new(router, config).app()
}

/// A response reduced to what assertions need.
#[allow(dead_code)]
pub struct Reply {
    pub status: StatusCode,
    pub request_id: Option<String>,
    pub body: String,
}

impl Reply {
    #[allow(dead_code)]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Send one request through `app`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

    Reply {
        status,
        request_id,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
