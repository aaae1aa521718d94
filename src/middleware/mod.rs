//! Middleware subsystem.
//!
//! # Data Flow
//! ```text
//! Matched request (Context)
//!     → request_log.rs (timing, one log line per request)
//!     → access_control.rs (bearer key per path prefix, may stop here)
//!     → store_switch.rs (choose backing store, put it in the Context)
//!     → route handler
//! ```
//!
//! # Design Decisions
//! - Order is registration order; nothing reorders stages
//! - Continuation is an explicit `Next` token; dropping it ends the request
//! - Reloadable settings live behind `ArcSwap` inside a stage, never in the chain

pub mod access_control;
pub mod chain;
pub mod request_log;
pub mod store_switch;

pub use access_control::AccessControl;
pub use chain::{Middleware, MiddlewareChain, Next};
pub use request_log::request_log;
pub use store_switch::StoreSwitch;
