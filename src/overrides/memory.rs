// src/overrides/memory.rs
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::RuleSet;

use super::traits::{OverrideError, OverrideProvider};

/// In-process key-value override store.
#[derive(Debug, Default)]
pub struct MemoryOverrides {
    entries: RwLock<HashMap<String, RuleSet>>,
}

impl MemoryOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the override for a key, returning the previous one.
    pub fn set(&self, key: impl Into<String>, rules: RuleSet) -> Option<RuleSet> {
        self.entries.write().insert(key.into(), rules)
    }

    /// Remove the override for a key.
    pub fn remove(&self, key: &str) -> Option<RuleSet> {
        self.entries.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl OverrideProvider for MemoryOverrides {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn fetch(&self, key: &str) -> Result<Option<RuleSet>, OverrideError> {
        Ok(self.entries.read().get(key).cloned())
    }
}
