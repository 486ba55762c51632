use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::info;

use tierconf::api::{create_router, AppState};
use tierconf::config::Config;
use tierconf::domain::RuleSet;
use tierconf::observability::{init_tracing, MetricsRegistry};
use tierconf::overrides::{FileOverrides, OverrideProvider, StaticOverrides};
use tierconf::policy::load_rules;
use tierconf::service::RuleConfigService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    init_tracing(&config.log_level, config.log_json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting tierconf pricing rule service"
    );

    // Defaults are fixed for the life of the process
    let defaults = match config.defaults_path {
        Some(ref path) => {
            let rules = load_rules(path)?;
            info!(path = %path.display(), categories = rules.len(), "Loaded default rules");
            rules
        }
        None => {
            info!("Using built-in default rules");
            RuleSet::builtin()
        }
    };

    let provider: Arc<dyn OverrideProvider> = match config.overrides_dir {
        Some(ref dir) => {
            info!(dir = %dir.display(), "File overrides enabled");
            Arc::new(FileOverrides::new(dir))
        }
        None => {
            info!("Overrides disabled (no directory configured)");
            Arc::new(StaticOverrides::empty())
        }
    };

    let service = RuleConfigService::new(
        Arc::new(defaults),
        provider,
        config.deployment_id.clone(),
        config.override_timeout(),
        Arc::new(MetricsRegistry::new()),
    );

    // Create application state
    let state = Arc::new(AppState {
        service,
        version: env!("CARGO_PKG_VERSION").to_string(),
    });

    // Create router
    let app = create_router(state);

    // Parse listen address
    let addr: SocketAddr = config.listen_addr.parse()?;

    info!(addr = %addr, deployment = %config.deployment_id, "Starting HTTP server");

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    if config.graceful_shutdown {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    } else {
        axum::serve(listener, app).await?;
    }

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
