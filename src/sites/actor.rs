use super::models::DirectorySnapshot;
use super::source::DatasetSource;
use crate::error::{dataset_error, ServiceResult};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// The site directory actor that owns the current snapshot
pub struct SiteDirectoryActor {
    source: Arc<dyn DatasetSource>,
    snapshot: Arc<DirectorySnapshot>,
    command_rx: mpsc::Receiver<SiteDirectoryCommand>,
}

/// Commands that can be sent to the site directory actor
pub enum SiteDirectoryCommand {
    GetSnapshot(mpsc::Sender<Arc<DirectorySnapshot>>),
    Refresh(mpsc::Sender<ServiceResult<usize>>),
    Shutdown,
}

/// Handle for communicating with the site directory actor
#[derive(Clone)]
pub struct SiteDirectoryActorHandle {
    command_tx: mpsc::Sender<SiteDirectoryCommand>,
}

impl SiteDirectoryActorHandle {
    /// Get the current directory snapshot
    pub async fn snapshot(&self) -> ServiceResult<Arc<DirectorySnapshot>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(SiteDirectoryCommand::GetSnapshot(response_tx))
            .await
            .map_err(|e| dataset_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| dataset_error("Response channel closed"))
    }

    /// Fetch the dataset and replace the snapshot, returning the site count
    pub async fn refresh(&self) -> ServiceResult<usize> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(SiteDirectoryCommand::Refresh(response_tx))
            .await
            .map_err(|e| dataset_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| dataset_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ServiceResult<()> {
        let _ = self.command_tx.send(SiteDirectoryCommand::Shutdown).await;
        Ok(())
    }
}

impl SiteDirectoryActor {
    /// Create a new actor and return its handle
    pub fn new(source: Arc<dyn DatasetSource>) -> (Self, SiteDirectoryActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            source,
            snapshot: Arc::new(DirectorySnapshot::default()),
            command_rx,
        };

        let handle = SiteDirectoryActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Site directory actor started");

        // Process commands
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                SiteDirectoryCommand::GetSnapshot(response_tx) => {
                    let _ = response_tx.send(Arc::clone(&self.snapshot)).await;
                }
                SiteDirectoryCommand::Refresh(response_tx) => {
                    let result = self.refresh_snapshot().await;
                    let _ = response_tx.send(result).await;
                }
                SiteDirectoryCommand::Shutdown => {
                    info!("Site directory actor shutting down");
                    break;
                }
            }
        }

        info!("Site directory actor shut down");
    }

    /// Fetch the dataset and swap in a fresh snapshot
    ///
    /// A failed fetch keeps the previous site list and marks it stale, so
    /// readers keep getting the last good data.
    async fn refresh_snapshot(&mut self) -> ServiceResult<usize> {
        match self.source.fetch_sites().await {
            Ok(sites) => {
                let count = sites.len();
                self.snapshot = Arc::new(DirectorySnapshot {
                    sites,
                    fetched_at: Some(Utc::now()),
                    stale: false,
                });
                info!("Loaded {} drop-off sites", count);
                Ok(count)
            }
            Err(e) => {
                error!("Failed to refresh site directory: {}", e);
                self.snapshot = Arc::new(DirectorySnapshot {
                    sites: self.snapshot.sites.clone(),
                    fetched_at: self.snapshot.fetched_at,
                    stale: true,
                });
                Err(e)
            }
        }
    }
}
