// src/overrides/fixed.rs
use async_trait::async_trait;

use crate::domain::RuleSet;

use super::traits::{OverrideError, OverrideProvider};

/// Provider returning the same override for every key.
#[derive(Debug, Clone, Default)]
pub struct StaticOverrides {
    rules: Option<RuleSet>,
}

impl StaticOverrides {
    /// No override configured; every request gets the defaults.
    pub fn empty() -> Self {
        StaticOverrides::default()
    }

    pub fn new(rules: RuleSet) -> Self {
        StaticOverrides { rules: Some(rules) }
    }
}

#[async_trait]
impl OverrideProvider for StaticOverrides {
    fn kind(&self) -> &'static str {
        "static"
    }

    async fn fetch(&self, _key: &str) -> Result<Option<RuleSet>, OverrideError> {
        Ok(self.rules.clone())
    }
}
