//! Build identification.

use std::fmt;

/// Version, commit, and build date baked in at compile time.
///
/// Commit and date come from the `TOAD_COMMIT` and `TOAD_BUILD_DATE`
/// environment variables when the binary is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Release {
    pub version: &'static str,
    pub commit: &'static str,
    pub date: &'static str,
}

impl Release {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("TOAD_COMMIT").unwrap_or("none"),
            date: option_env!("TOAD_BUILD_DATE").unwrap_or("unknown"),
        }
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Toad Version {} Commit {}, Built @{}",
            self.version, self.commit, self.date
        )
    }
}
