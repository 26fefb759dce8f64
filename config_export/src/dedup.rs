//! Registry of key paths already emitted by a session.

use std::collections::HashSet;

/// Remembers emitted key paths when deduplication is enabled.
///
/// Lookups are always answered; registration is a no-op while disabled, so
/// a disabled registry never suppresses anything.
#[derive(Debug, Default)]
pub(crate) struct KeyRegistry {
    enabled: bool,
    keys: HashSet<String>,
}

impl KeyRegistry {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            keys: HashSet::new(),
        }
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub(crate) fn register(&mut self, key: String) {
        if self.enabled {
            self.keys.insert(key);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }
}
