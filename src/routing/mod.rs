//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     "/items/:id[\d+]"
//!     → pattern.rs (split, classify segments, compile constraints)
//!     → table.rs (append to the method's list)
//!     → router.rs (freeze table + middleware chain, share via Arc)
//!
//! Incoming request (method, path)
//!     → table.rs (linear scan of the method's routes)
//!     → pattern.rs (segment-by-segment match, collect captures)
//!     → router.rs (run middleware chain, then the route handler)
//! ```
//!
//! # Design Decisions
//! - First match wins, in registration order; no specificity ranking
//! - Segment counts must agree; there are no wildcard segments
//! - Registration errors are per call and never abort the process

pub mod error;
pub mod pattern;
pub mod router;
pub mod table;

pub use error::{MatchError, RouterError};
pub use pattern::{Captures, PatternError, RoutePattern, Segment};
pub use router::Router;
pub use table::{Route, RouteMatch, RouteTable};
