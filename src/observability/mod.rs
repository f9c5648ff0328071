//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, JSON on stdout)
//!     → metrics.rs (counters)
//!
//! Every request carries a correlation id (see http::request) that is
//! attached to its log lines.
//! ```

pub mod logging;
pub mod metrics;
