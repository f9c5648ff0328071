//! Key-value store subsystem.
//!
//! # Data Flow
//! ```text
//! StateCoordinator
//!     → KvStore (trait object, shared via Arc)
//!         → redis_store.rs (shared ConnectionManager, bounded by timeouts)
//!         → memory.rs      (DashMap, single process)
//! ```
//!
//! # Design Decisions
//! - The store is the only source of truth; adapters never cache values
//! - Every operation is a single key read or write
//! - `increment` is atomic per key and applies the counter's degrade rules
//!   (absent or malformed ⇒ 1) on the store side
//! - A counter at `MAX_COUNTER` refuses to advance rather than wrap or lose
//!   precision

pub mod memory;
pub mod redis_store;

use futures_util::future::BoxFuture;
use thiserror::Error;

pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to connect to store: {0}")]
    Connect(String),

    #[error("store command failed: {0}")]
    Command(String),

    #[error("store operation timed out after {0}ms")]
    Timeout(u64),
}

/// A shared string key-value store.
///
/// Methods return boxed futures so the store can live behind `Arc<dyn KvStore>`
/// in the application state.
pub trait KvStore: Send + Sync {
    /// Liveness probe.
    fn ping(&self) -> BoxFuture<'_, StoreResult<()>>;

    /// Read a key. `None` when the key does not exist.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, StoreResult<Option<String>>>;

    /// Write a key, without expiry.
    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, StoreResult<()>>;

    /// Atomically advance a base-1 counter and return the new value.
    ///
    /// A missing key, or one holding anything but a positive integer, counts
    /// as 1 before the increment. Fails without writing once the counter has
    /// reached [`MAX_COUNTER`].
    fn increment<'a>(&'a self, key: &'a str) -> BoxFuture<'a, StoreResult<i64>>;
}

/// Largest counter value any adapter will advance from. Redis runs the
/// increment in Lua, where numbers are doubles and stop being exact past 2^53.
pub const MAX_COUNTER: i64 = 9_007_199_254_740_991;

/// Parse a stored counter value, degrading anything that is not a positive
/// integer to `None`.
///
/// Only ASCII digits with optional surrounding whitespace are accepted, so
/// signs, exponents and hex prefixes are malformed on every adapter.
pub fn parse_counter(raw: &str) -> Option<i64> {
    let digits = counter_digits(raw)?;
    digits.parse::<i64>().ok().filter(|value| *value >= 1)
}

/// Compute the value that follows `raw` under the counter's degrade rules.
///
/// Fails with [`StoreError::Command`] once the counter has reached
/// [`MAX_COUNTER`]; the caller must leave the stored value untouched.
pub fn advance_counter(raw: Option<&str>) -> StoreResult<i64> {
    let current = match raw.and_then(counter_digits) {
        None => 1,
        Some(digits) => match digits.parse::<i64>() {
            Ok(value) => value.max(1),
            Err(_) => MAX_COUNTER,
        },
    };

    if current >= MAX_COUNTER {
        return Err(StoreError::Command("counter overflow".into()));
    }
    Ok(current + 1)
}

fn counter_digits(raw: &str) -> Option<&str> {
    let digits = raw.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}
