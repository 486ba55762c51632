use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Pricing rule service configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "tierconf")]
#[command(about = "Serves layered pricing rules as no-cache JSON")]
pub struct Config {
    /// HTTP server listen address
    #[arg(long, default_value = "0.0.0.0:8080", env = "TIERCONF_LISTEN_ADDR")]
    pub listen_addr: String,

    /// YAML or JSON file replacing the built-in default rules
    #[arg(long, env = "TIERCONF_DEFAULTS_PATH")]
    pub defaults_path: Option<PathBuf>,

    /// Directory of per-deployment override documents (no overrides if not set)
    #[arg(long, env = "TIERCONF_OVERRIDES_DIR")]
    pub overrides_dir: Option<PathBuf>,

    /// Key used to look up this deployment's override
    #[arg(long, default_value = "default", env = "TIERCONF_DEPLOYMENT_ID")]
    pub deployment_id: String,

    /// Upper bound on a single override lookup, in milliseconds
    #[arg(long, default_value = "250", env = "TIERCONF_OVERRIDE_TIMEOUT_MS")]
    pub override_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, default_value = "false", env = "TIERCONF_LOG_JSON")]
    pub log_json: bool,

    /// Enable graceful shutdown
    #[arg(long, default_value = "true", env = "TIERCONF_GRACEFUL_SHUTDOWN")]
    pub graceful_shutdown: bool,
}

impl Config {
    /// Get override lookup timeout as Duration.
    pub fn override_timeout(&self) -> Duration {
        Duration::from_millis(self.override_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_addr: "0.0.0.0:8080".to_string(),
            defaults_path: None,
            overrides_dir: None,
            deployment_id: "default".to_string(),
            override_timeout_ms: 250,
            log_level: "info".to_string(),
            log_json: false,
            graceful_shutdown: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.deployment_id, "default");
        assert!(config.overrides_dir.is_none());
    }

    #[test]
    fn test_parse_flags() {
        let config = Config::try_parse_from([
            "tierconf",
            "--overrides-dir",
            "/srv/overrides",
            "--deployment-id",
            "store-7",
            "--override-timeout-ms",
            "40",
        ])
        .unwrap();

        assert_eq!(config.overrides_dir, Some(PathBuf::from("/srv/overrides")));
        assert_eq!(config.deployment_id, "store-7");
        assert_eq!(config.override_timeout(), Duration::from_millis(40));
    }
}
