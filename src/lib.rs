pub mod api;
pub mod config;
pub mod domain;
pub mod observability;
pub mod overrides;
pub mod policy;
pub mod service;

pub use config::Config;
pub use domain::{merge, RuleSet, TierTable};
pub use overrides::{OverrideError, OverrideProvider};
pub use service::RuleConfigService;
