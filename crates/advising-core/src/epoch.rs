//! Per-container request epochs.
//!
//! Every fetch that targets a container takes a fresh epoch first. When the
//! response arrives it is applied only if no newer fetch has started for the
//! same container in the meantime.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEpoch {
    container: String,
    value: u64,
}

impl RequestEpoch {
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

/// Monotonic counters keyed by container id.
#[derive(Debug, Clone, Default)]
pub struct EpochRegistry {
    counters: Arc<Mutex<HashMap<String, u64>>>,
}

impl EpochRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request for `container`, superseding any in flight.
    pub fn begin(&self, container: &str) -> RequestEpoch {
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        let counter = counters.entry(container.to_string()).or_insert(0);
        *counter += 1;
        RequestEpoch {
            container: container.to_string(),
            value: *counter,
        }
    }

    pub fn is_current(&self, epoch: &RequestEpoch) -> bool {
        let counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters.get(&epoch.container).copied() == Some(epoch.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_supersedes_older() {
        let registry = EpochRegistry::new();
        let first = registry.begin("results");
        let second = registry.begin("results");

        assert!(!registry.is_current(&first));
        assert!(registry.is_current(&second));
        assert!(second.value() > first.value());
    }

    #[test]
    fn test_containers_are_independent() {
        let registry = EpochRegistry::new();
        let results = registry.begin("results");
        let _notes = registry.begin("notes");
        assert!(registry.is_current(&results));
    }
}
