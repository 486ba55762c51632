// src/overrides/traits.rs
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::RuleSet;
use crate::policy::LoadError;

/// Failures an override lookup can report.
///
/// "No override for this key" is not among them; providers return
/// `Ok(None)` for that.
#[derive(Error, Debug)]
pub enum OverrideError {
    #[error("invalid override key: {0:?}")]
    InvalidKey(String),

    #[error("override document error: {0}")]
    Load(#[from] LoadError),

    #[error("override lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of per-deployment rule overrides.
///
/// Called once per request; implementations must not cache results
/// across calls.
#[async_trait]
pub trait OverrideProvider: Send + Sync {
    /// Short label for logs.
    fn kind(&self) -> &'static str;

    /// Look up the override rule set for `key`.
    async fn fetch(&self, key: &str) -> Result<Option<RuleSet>, OverrideError>;
}
