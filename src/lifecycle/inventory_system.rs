use crate::config::DEFAULT_COLLECTION;
use crate::service::InventoryService;
use crate::store::{CollectionActor, CollectionClient};
use tracing::{error, info};

const COLLECTION_BUFFER: usize = 32;

/// Runtime for an inventory backed by an in-process collection actor.
///
/// `InventorySystem` is responsible for:
/// - **Lifecycle Management**: starting the collection actor and stopping it
/// - **Wiring**: handing the actor's client to the [`InventoryService`]
///
/// # Example
///
/// ```ignore
/// let system = InventorySystem::new();
///
/// system.service.add("Banana").await?;
/// let items = system.service.refresh().await?;
///
/// system.shutdown().await?;
/// ```
pub struct InventorySystem {
    /// Inventory operations over the running collection.
    pub service: InventoryService<CollectionClient>,

    /// Task handle for the collection actor (used for graceful shutdown).
    handle: tokio::task::JoinHandle<()>,
}

impl InventorySystem {
    /// Starts a collection actor named after the default collection.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        Self::with_collection(DEFAULT_COLLECTION)
    }

    pub fn with_collection(name: &str) -> Self {
        let (actor, client) = CollectionActor::new(name, COLLECTION_BUFFER);
        let handle = tokio::spawn(actor.run());

        Self {
            service: InventoryService::new(client),
            handle,
        }
    }

    /// A new client for the running collection, e.g. for a second service.
    pub fn client(&self) -> CollectionClient {
        self.service.store().clone()
    }

    /// Gracefully shuts down the collection actor.
    ///
    /// Dropping the service closes the actor's channel once every other client
    /// handed out by [`InventorySystem::client`] has been dropped too; this then
    /// waits for the actor task to finish.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down inventory...");

        drop(self.service);

        if let Err(e) = self.handle.await {
            error!("Collection task failed: {:?}", e);
            return Err(format!("Collection task failed: {:?}", e));
        }

        info!("Inventory shutdown complete.");
        Ok(())
    }
}

impl Default for InventorySystem {
    fn default() -> Self {
        Self::new()
    }
}
