use crate::config::Config;
use crate::error::Error;
use crate::http::{self, AppState};
use crate::shutdown;
use crate::sites::{run_refresh_loop, source::SocrataSource, SiteDirectoryHandle};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and validate the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Initialize the site directory and start the HTTP server
pub async fn start_service(config: Config) -> miette::Result<()> {
    let timezone = config.site_timezone()?;
    let port = config.port;
    let refresh_interval_secs = config.refresh_interval_secs;

    // Spawn the directory actor over the live dataset
    let source = Arc::new(SocrataSource::new(config.dataset_url.clone())?);
    let directory = SiteDirectoryHandle::new(source);

    // Load the dataset before serving; a failure is logged, not fatal
    match directory.refresh().await {
        Ok(count) => info!("Initial dataset load complete ({} sites)", count),
        Err(e) => error!(
            "Initial dataset load failed, serving an empty directory: {}",
            e
        ),
    }

    // Spawn the periodic refresh task
    let refresh_directory = directory.clone();
    tokio::spawn(async move {
        run_refresh_loop(refresh_directory, refresh_interval_secs).await;
    });

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Clone directory handle for shutdown handler
    let shutdown_directory = directory.clone();

    // Spawn signal handler task
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_directory).await;
    });

    let state = AppState {
        directory,
        timezone,
    };

    // Create a separate task to handle the server
    info!("Starting HTTP server...");
    let server_handle = tokio::spawn(async move { http::serve(state, port).await });

    // Wait for either the server to end or a shutdown signal
    tokio::select! {
        result = server_handle => {
            info!("HTTP server ended");
            match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e.into()),
                Err(e) => {
                    error!("Server task error: {:?}", e);
                    Err(Error::Other(format!("Server task error: {}", e)).into())
                }
            }
        }
        _ = shutdown_recv => {
            info!("Received shutdown signal, shutting down...");
            Ok(())
        }
    }
}
