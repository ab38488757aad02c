use super::{PrefKey, PrefValue, PreferenceStore};
use std::collections::HashMap;

/// In-process store; nothing survives the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<PrefKey, PrefValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &PrefKey) -> Option<PrefValue> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: PrefKey, value: PrefValue) {
        self.entries.insert(key, value);
    }
}
