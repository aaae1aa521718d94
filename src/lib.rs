//! Segment router with ordered middleware dispatch.
//!
//! Routes are `(method, pattern)` pairs where a pattern mixes literal,
//! named (`:id`) and regex-constrained (`:id[\d+]`) segments. A request is
//! matched against its method's routes in registration order, then passed
//! through the named middleware chain, then to the route handler.
//!
//! ```no_run
//! use route_chain::http::Context;
//! use route_chain::middleware::Next;
//! use route_chain::routing::Router;
//!
//! # fn build() -> Result<Router, route_chain::routing::RouterError> {
//! let mut router = Router::new();
//! router
//!     .middleware("audit", |ctx: Context, next: Next| next.run(ctx))?
//!     .get(r"/items/:id[\d+]", |ctx: Context| async move {
//!         ctx.param("id").unwrap_or_default().to_string()
//!     })?;
//! # Ok(router)
//! # }
//! ```

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod middleware;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::RouterConfig;
pub use http::{Context, HttpServer};
pub use lifecycle::Shutdown;
pub use middleware::{Middleware, Next};
pub use routing::{MatchError, Router, RouterError};
