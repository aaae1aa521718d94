//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum + tower-http layers: request ID, trace, timeout, body limit)
//!     → routing::Router::handle (match, then middleware chain)
//!     → context.rs (per-request state handed from stage to stage)
//!     → handler.rs (route handler produces the response)
//! ```

pub mod context;
pub mod handler;
pub mod server;

pub use context::{Context, Resource, X_REQUEST_ID};
pub use handler::{BoxHandler, Handler};
pub use server::HttpServer;
