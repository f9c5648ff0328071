//! Health and generation state subsystem.
//!
//! # Data Flow
//! ```text
//! GET /_health or --get health
//!     → health.rs (mode check, then probe + verdict)
//!     → coordinator.rs (is_down: host flag OR fleet flag)
//!
//! GET /do/{action}
//!     → coordinator.rs (init, apply action, read generation)
//!     → keys.rs (key layout)
//!     → store (single key reads/writes)
//! ```
//!
//! # State
//! ```text
//! host flag:  unset | up | down    (per host)
//! fleet flag: unset | up | down    (shared)
//! down  ⇔  host == down  ∨  fleet == down
//! ```

pub mod coordinator;
pub mod health;
pub mod keys;

pub use coordinator::{
    Action, CoordinatorError, CoordinatorResult, Flag, StateCoordinator, UnknownAction,
    INITIAL_GENERATION,
};
pub use health::{check_health, HealthOutcome};
pub use keys::KeySpace;
