//! Resilience subsystem.
//!
//! # Design Decisions
//! - Every store call has a deadline (timeouts.rs)
//! - No retries: a failed probe fails the request, the caller decides

pub mod timeouts;
