pub mod metrics;
pub mod tracing;

pub use metrics::{MetricsRegistry, OverrideOutcome};
pub use tracing::init_tracing;
