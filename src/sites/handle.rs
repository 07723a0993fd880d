use super::actor::{SiteDirectoryActor, SiteDirectoryActorHandle};
use super::models::DirectorySnapshot;
use super::source::DatasetSource;
use crate::error::ServiceResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the site directory actor
#[derive(Clone)]
pub struct SiteDirectoryHandle {
    actor_handle: SiteDirectoryActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl SiteDirectoryHandle {
    /// Create a new SiteDirectoryHandle and spawn the actor
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = SiteDirectoryActor::new(source);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Get the current directory snapshot
    pub async fn snapshot(&self) -> ServiceResult<Arc<DirectorySnapshot>> {
        self.actor_handle.snapshot().await
    }

    /// Fetch the dataset and replace the snapshot, returning the site count
    pub async fn refresh(&self) -> ServiceResult<usize> {
        self.actor_handle.refresh().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ServiceResult<()> {
        self.actor_handle.shutdown().await
    }
}
