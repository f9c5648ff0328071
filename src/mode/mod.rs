//! Stateful/stateless mode selection.
//!
//! # Data Flow
//! ```text
//! every health check / action
//!     → ModeSelector::is_stateful()
//!     → ModeSource::flag()   (env var or manual switch, read fresh)
//!     → exactly "true" ⇒ stateful, anything else ⇒ stateless
//! ```
//!
//! # Design Decisions
//! - Never cached: the flag may change between two requests
//! - Reading the flag has no side effects and cannot fail

use std::sync::Arc;

use arc_swap::ArcSwapOption;

/// Literal that switches stateful mode on.
pub const STATEFUL_LITERAL: &str = "true";

/// Interpret a raw flag value.
pub fn is_stateful_flag(value: Option<&str>) -> bool {
    value == Some(STATEFUL_LITERAL)
}

/// Where the stateful flag is read from.
pub trait ModeSource: Send + Sync {
    /// Current raw value of the flag, `None` when unset.
    fn flag(&self) -> Option<String>;
}

/// Reads the flag from a process environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvMode {
    var: String,
}

impl EnvMode {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl ModeSource for EnvMode {
    fn flag(&self) -> Option<String> {
        std::env::var(&self.var).ok()
    }
}

/// A flag held in memory that can be flipped at runtime.
#[derive(Default)]
pub struct ManualMode {
    value: ArcSwapOption<String>,
}

impl ManualMode {
    pub fn new(value: Option<&str>) -> Self {
        Self {
            value: ArcSwapOption::from(value.map(|v| Arc::new(v.to_string()))),
        }
    }

    /// Replace the raw flag value.
    pub fn set(&self, value: Option<&str>) {
        self.value.store(value.map(|v| Arc::new(v.to_string())));
    }
}

impl ModeSource for ManualMode {
    fn flag(&self) -> Option<String> {
        self.value.load_full().map(|v| v.as_ref().clone())
    }
}

/// Decides, per call, whether the process runs stateful.
#[derive(Clone)]
pub struct ModeSelector {
    source: Arc<dyn ModeSource>,
}

impl ModeSelector {
    pub fn new(source: Arc<dyn ModeSource>) -> Self {
        Self { source }
    }

    /// Selector backed by an environment variable.
    pub fn from_env(var: impl Into<String>) -> Self {
        Self::new(Arc::new(EnvMode::new(var)))
    }

    /// Selector backed by a [`ManualMode`] the caller keeps a handle to.
    pub fn manual(source: Arc<ManualMode>) -> Self {
        Self { source }
    }

    pub fn is_stateful(&self) -> bool {
        is_stateful_flag(self.source.flag().as_deref())
    }

    pub fn is_stateless(&self) -> bool {
        !self.is_stateful()
    }
}
