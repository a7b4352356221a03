//! In-memory snapshot registry for the active configuration.
//!
//! Holds the last successful listing for exactly one configuration at a
//! time. The set is always replaced wholesale; a failed listing never
//! touches it, so the console keeps showing the last good state.

use std::sync::{Arc, Mutex, PoisonError};

/// Metadata for one snapshot as reported by the external tool.
///
/// Identity is `(config, id)`. The id and timestamp are carried verbatim;
/// the tool assigns ids monotonically and the registry never re-sorts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub config: String,
    pub id: String,
    pub timestamp: String,
    pub description: String,
}

#[derive(Debug, Default)]
struct Inner {
    config: Option<String>,
    records: Vec<SnapshotRecord>,
}

/// Mutex-guarded snapshot set, shared between the refresh coordinator and
/// the render loop.
#[derive(Debug, Default)]
pub struct Registry {
    inner: Mutex<Inner>,
}

/// Handle shared between the render loop and background tasks.
pub type SharedRegistry = Arc<Registry>;

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically swaps the active set for `config`.
    pub fn replace(&self, config: &str, records: Vec<SnapshotRecord>) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.config = Some(config.to_string());
        inner.records = records;
    }

    /// Returns a consistent copy of the active configuration and its records.
    pub fn current(&self) -> (Option<String>, Vec<SnapshotRecord>) {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        (inner.config.clone(), inner.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(config: &str, id: &str) -> SnapshotRecord {
        SnapshotRecord {
            config: config.to_string(),
            id: id.to_string(),
            timestamp: "2026-02-07 17:00:00".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn starts_empty() {
        let registry = Registry::new();
        let (config, records) = registry.current();
        assert!(config.is_none());
        assert!(records.is_empty());
    }

    #[test]
    fn replace_swaps_the_whole_set() {
        let registry = Registry::new();
        registry.replace("root", vec![record("root", "1"), record("root", "2")]);
        registry.replace("root", vec![record("root", "2")]);

        let (config, records) = registry.current();
        assert_eq!(config.as_deref(), Some("root"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "2");
    }

    #[test]
    fn replace_switches_configuration() {
        let registry = Registry::new();
        registry.replace("root", vec![record("root", "1")]);
        registry.replace("home", vec![]);

        let (config, records) = registry.current();
        assert_eq!(config.as_deref(), Some("home"));
        assert!(records.is_empty());
    }
}
