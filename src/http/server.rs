//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap the segment router in an Axum app
//! - Wire up tower-http layers (request ID, tracing, timeout, body limit)
//! - Bind to a listener and serve until shutdown

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RouterConfig;
use crate::lifecycle::Shutdown;
use crate::routing::Router as SegmentRouter;

/// HTTP front end for a built [`SegmentRouter`].
pub struct HttpServer {
    app: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Freeze `router` and build the Axum app around it.
    pub fn new(router: SegmentRouter, config: RouterConfig) -> Self {
        let app = Self::build_app(Arc::new(router), &config);
        Self { app, config }
    }

    /// Build the Axum app with all middleware layers.
    ///
    /// Every request falls through to the segment router; Axum's own router
    /// is used only as the layer host.
    #[allow(deprecated)]
    fn build_app(router: Arc<SegmentRouter>, config: &RouterConfig) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(router)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The Axum app, for embedding or driving in tests.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Run the server until Ctrl+C or `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.app.into_make_service())
            .with_graceful_shutdown(async move { shutdown.wait_or_ctrl_c().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

async fn dispatch(State(router): State<Arc<SegmentRouter>>, request: Request<Body>) -> Response {
    router.handle(request).await
}
