//! Payroll engine HTTP server.
//!
//! Loads configuration from `PAYROLL_CONFIG_DIR` (default `./config/default`),
//! starts the batch submitter if enabled, and serves the API until Ctrl-C.

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

const CONFIG_DIR_ENV: &str = "PAYROLL_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = "./config/default";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir = std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    let settings = config.settings();
    info!(
        config_dir = %config_dir,
        employees = config.employees().len(),
        pay_groups = config.pay_groups().len(),
        "Configuration loaded"
    );

    let state = AppState::new(&config)?;

    let scheduler = if settings.scheduler.enabled {
        Some(state.submitter().spawn(settings.scheduler.interval()))
    } else {
        warn!("Batch submitter disabled; use /integration/payroll/run-now to submit");
        None
    };

    let listener = TcpListener::bind(&settings.server.bind_addr).await?;
    info!(bind_addr = %settings.server.bind_addr, "Payroll engine listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "Failed to listen for shutdown signal");
            }
        })
        .await?;

    if let Some(cancel) = scheduler {
        cancel.cancel();
    }
    info!("Payroll engine stopped");
    Ok(())
}
