use scrapmap::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting scrapmap");

    // Load configuration
    let config = startup::load_config()?;

    // Start the service
    startup::start_service(config).await
}
