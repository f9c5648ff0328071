//! Health verdict shared by the HTTP endpoint and the CLI probe.

use crate::mode::ModeSelector;
use crate::observability::metrics;
use crate::state::coordinator::StateCoordinator;

/// Outcome of a single health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthOutcome {
    /// Serve traffic.
    Ok,
    /// Marked down by the host or fleet flag.
    Down,
    /// The store could not be reached.
    Unavailable(String),
}

impl HealthOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthOutcome::Ok => "ok",
            HealthOutcome::Down => "down",
            HealthOutcome::Unavailable(_) => "unavailable",
        }
    }
}

/// Decide whether this instance should receive traffic.
///
/// The mode is consulted fresh on each call; stateless mode never touches the
/// store.
pub async fn check_health(mode: &ModeSelector, coordinator: &StateCoordinator) -> HealthOutcome {
    let outcome = if mode.is_stateless() {
        HealthOutcome::Ok
    } else {
        match coordinator.init().await {
            Err(e) => HealthOutcome::Unavailable(e.to_string()),
            Ok(()) => match coordinator.is_down().await {
                Ok(true) => HealthOutcome::Down,
                Ok(false) => HealthOutcome::Ok,
                Err(e) => HealthOutcome::Unavailable(e.to_string()),
            },
        }
    };

    metrics::record_health_check(outcome.as_str());
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ManualMode;
    use crate::state::keys::KeySpace;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn setup(flag: Option<&str>) -> (ModeSelector, StateCoordinator) {
        let mode = ModeSelector::manual(Arc::new(ManualMode::new(flag)));
        let coordinator = StateCoordinator::new(Arc::new(MemoryStore::new()), KeySpace::default(), "web-1");
        (mode, coordinator)
    }

    #[tokio::test]
    async fn test_stateless_ignores_flags() {
        let (mode, coordinator) = setup(None);
        coordinator.all_down().await.unwrap();
        assert_eq!(check_health(&mode, &coordinator).await, HealthOutcome::Ok);
    }

    #[tokio::test]
    async fn test_stateful_reports_down() {
        let (mode, coordinator) = setup(Some("true"));
        assert_eq!(check_health(&mode, &coordinator).await, HealthOutcome::Ok);

        coordinator.host_down().await.unwrap();
        assert_eq!(check_health(&mode, &coordinator).await, HealthOutcome::Down);
    }
}
