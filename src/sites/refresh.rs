use super::handle::SiteDirectoryHandle;
use tokio::time::{sleep, Duration};
use tracing::{error, info};

/// Periodically re-fetch the dataset so the snapshot tracks the source
///
/// Refresh failures are logged and the loop keeps going; the actor holds on
/// to the last good snapshot in the meantime.
pub async fn run_refresh_loop(handle: SiteDirectoryHandle, interval_secs: u64) {
    info!(
        "Starting dataset refresh loop (every {} seconds)",
        interval_secs
    );

    loop {
        sleep(Duration::from_secs(interval_secs)).await;

        if let Err(e) = handle.refresh().await {
            error!("Scheduled dataset refresh failed: {}", e);
        }
    }
}
