//! Key layout inside the shared store.

/// Builds the store keys under one namespace prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    prefix: String,
}

impl KeySpace {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Generation counter.
    pub fn generation(&self) -> String {
        format!("{}__state", self.prefix)
    }

    /// Fleet-wide health flag.
    pub fn fleet_health(&self) -> String {
        format!("{}__host_health", self.prefix)
    }

    /// Health flag of a single host.
    pub fn host_health(&self, host: &str) -> String {
        format!("{}__host_health__{}", self.prefix, host)
    }
}

impl Default for KeySpace {
    fn default() -> Self {
        Self::new("toad")
    }
}
