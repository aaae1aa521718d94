//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → app::build (routes, middleware, stores)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → access rules and store mounts swapped atomically
//!     → route table and middleware order stay as built
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Only middleware settings reload; routes and chain order need a restart

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AccessConfig, AccessRule, LimitsConfig, ListenerConfig, ObservabilityConfig, RouterConfig,
    StoreConfig, StoreMount, TimeoutConfig,
};
pub use validation::ValidationError;
