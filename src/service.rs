use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::{merge, RuleSet};
use crate::observability::{MetricsRegistry, OverrideOutcome};
use crate::overrides::{OverrideError, OverrideProvider};

/// Answers "which pricing rules are in effect right now".
///
/// Holds the process-wide defaults read-only and consults the override
/// provider on every call. Nothing fetched is kept between calls.
pub struct RuleConfigService {
    defaults: Arc<RuleSet>,
    provider: Arc<dyn OverrideProvider>,
    deployment_id: String,
    fetch_timeout: Duration,
    metrics: Arc<MetricsRegistry>,
}

impl RuleConfigService {
    pub fn new(
        defaults: Arc<RuleSet>,
        provider: Arc<dyn OverrideProvider>,
        deployment_id: impl Into<String>,
        fetch_timeout: Duration,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        RuleConfigService {
            defaults,
            provider,
            deployment_id: deployment_id.into(),
            fetch_timeout,
            metrics,
        }
    }

    pub fn defaults(&self) -> &RuleSet {
        &self.defaults
    }

    pub fn deployment_id(&self) -> &str {
        &self.deployment_id
    }

    pub fn provider_kind(&self) -> &'static str {
        self.provider.kind()
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Build the effective configuration for this deployment.
    ///
    /// Never fails: a missing, failing, slow or malformed override yields
    /// the defaults unchanged.
    pub async fn get_effective_config(&self) -> RuleSet {
        match self.fetch_override().await {
            Ok(Some(overrides)) => {
                self.metrics.record_override(OverrideOutcome::Hit);
                debug!(
                    deployment = %self.deployment_id,
                    categories = overrides.len(),
                    "Applying override"
                );
                merge(&self.defaults, &overrides)
            }
            Ok(None) => {
                self.metrics.record_override(OverrideOutcome::Miss);
                self.defaults.as_ref().clone()
            }
            Err(e) => {
                self.metrics.record_override(OverrideOutcome::Fallback);
                warn!(
                    deployment = %self.deployment_id,
                    provider = self.provider.kind(),
                    error = %e,
                    "Override lookup failed, serving defaults"
                );
                self.defaults.as_ref().clone()
            }
        }
    }

    async fn fetch_override(&self) -> Result<Option<RuleSet>, OverrideError> {
        let overrides = tokio::time::timeout(
            self.fetch_timeout,
            self.provider.fetch(&self.deployment_id),
        )
        .await
        .map_err(|_| OverrideError::Timeout(self.fetch_timeout))??;

        // Providers that skip shape checks are caught here.
        if let Some(ref rules) = overrides {
            rules
                .validate()
                .map_err(|e| OverrideError::Load(e.into()))?;
        }

        Ok(overrides)
    }
}
