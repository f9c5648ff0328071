//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (REDIS_*, TOAD_HOSTNAME)
//!     → validation.rs (semantic checks)
//!     → ToadConfig (validated, immutable)
//!     → CLI overrides (--port) in main
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow running with no file at all
//! - Validation separates syntactic (serde) from semantic checks
//! - The stateful flag is NOT part of the loaded config; it is re-read on
//!   every call by the mode selector

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    HostConfig, KeyConfig, ListenerConfig, LogFormat, ModeConfig, ObservabilityConfig,
    StoreConfig, TimeoutConfig, ToadConfig,
};
