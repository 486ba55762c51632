use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// How an override lookup ended for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideOutcome {
    /// Provider returned an override that was merged.
    Hit,
    /// Provider had nothing for the key.
    Miss,
    /// Provider failed or timed out; defaults were served.
    Fallback,
}

/// Metrics registry for the application.
#[derive(Debug)]
pub struct MetricsRegistry {
    started_at: Instant,

    /// Total config requests served
    pub config_requests_total: AtomicU64,

    /// Override lookups by outcome
    pub override_hits: AtomicU64,
    pub override_misses: AtomicU64,
    pub override_fallbacks: AtomicU64,

    /// Responses that failed to serialize
    pub serialization_errors: AtomicU64,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        MetricsRegistry {
            started_at: Instant::now(),
            config_requests_total: AtomicU64::new(0),
            override_hits: AtomicU64::new(0),
            override_misses: AtomicU64::new(0),
            override_fallbacks: AtomicU64::new(0),
            serialization_errors: AtomicU64::new(0),
        }
    }
}

impl MetricsRegistry {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        MetricsRegistry::default()
    }

    /// Record a config request.
    pub fn record_request(&self) {
        self.config_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of an override lookup.
    pub fn record_override(&self, outcome: OverrideOutcome) {
        let counter = match outcome {
            OverrideOutcome::Hit => &self.override_hits,
            OverrideOutcome::Miss => &self.override_misses,
            OverrideOutcome::Fallback => &self.override_fallbacks,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a response serialization failure.
    pub fn record_serialization_error(&self) {
        self.serialization_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        format!(
            r#"# HELP tierconf_uptime_seconds Application uptime in seconds
# TYPE tierconf_uptime_seconds counter
tierconf_uptime_seconds {}

# HELP tierconf_config_requests_total Total config requests served
# TYPE tierconf_config_requests_total counter
tierconf_config_requests_total {}

# HELP tierconf_override_hits_total Override lookups that returned rules
# TYPE tierconf_override_hits_total counter
tierconf_override_hits_total {}

# HELP tierconf_override_misses_total Override lookups with no override for the key
# TYPE tierconf_override_misses_total counter
tierconf_override_misses_total {}

# HELP tierconf_override_fallbacks_total Override lookups that failed and fell back to defaults
# TYPE tierconf_override_fallbacks_total counter
tierconf_override_fallbacks_total {}

# HELP tierconf_serialization_errors_total Config responses that failed to serialize
# TYPE tierconf_serialization_errors_total counter
tierconf_serialization_errors_total {}
"#,
            self.uptime_secs(),
            self.config_requests_total.load(Ordering::Relaxed),
            self.override_hits.load(Ordering::Relaxed),
            self.override_misses.load(Ordering::Relaxed),
            self.override_fallbacks.load(Ordering::Relaxed),
            self.serialization_errors.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_override_outcomes() {
        let metrics = MetricsRegistry::new();

        metrics.record_override(OverrideOutcome::Hit);
        metrics.record_override(OverrideOutcome::Miss);
        metrics.record_override(OverrideOutcome::Miss);
        metrics.record_override(OverrideOutcome::Fallback);

        assert_eq!(metrics.override_hits.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.override_misses.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.override_fallbacks.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_prometheus_format() {
        let metrics = MetricsRegistry::new();
        metrics.record_request();
        metrics.record_serialization_error();

        let output = metrics.to_prometheus();

        assert!(output.contains("tierconf_config_requests_total 1"));
        assert!(output.contains("tierconf_serialization_errors_total 1"));
        assert!(output.contains("tierconf_override_fallbacks_total 0"));
    }
}
