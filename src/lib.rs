//! Toad: fleet health and maintenance-mode coordinator.
//!
//! Operators mark a host, or the whole fleet, up or down; load balancers poll
//! `/_health` to decide whether to route traffic here. In stateful mode the
//! flags and a generation counter live in a shared Redis so every process
//! sees the same signal.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod mode;
pub mod observability;
pub mod release;
pub mod resilience;
pub mod state;
pub mod store;

pub use config::ToadConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use mode::ModeSelector;
pub use state::{check_health, HealthOutcome, StateCoordinator};
