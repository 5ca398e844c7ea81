//! # Inventory Tracker Demo
//!
//! Runs a scripted session against the configured collection:
//! 1. Loads the inventory.
//! 2. Adds, increments, decrements and removes an item.
//! 3. Searches the result.
//!
//! With `INVENTORY_PROJECT_ID` set the session runs against Firestore; without it
//! an in-process collection is started and shut down again.

use inventory_tracker::config::{ConfigError, StoreConfig};
use inventory_tracker::lifecycle::{setup_tracing, InventorySystem};
use inventory_tracker::service::InventoryService;
use inventory_tracker::store::{FirestoreStore, InventoryStore};
use inventory_tracker::view::InventoryView;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    match StoreConfig::from_env() {
        Ok(config) => {
            info!(
                project = %config.project_id,
                collection = %config.collection,
                "Using Firestore collection"
            );
            let service = InventoryService::new(FirestoreStore::new(config));
            run_session(service).await;
        }
        Err(ConfigError::Missing(_)) => {
            info!("No project configured, using in-process collection");
            let system = InventorySystem::new();
            run_session(system.service.clone()).await;
            system.shutdown().await?;
        }
        Err(e) => return Err(e.to_string()),
    }

    info!("Session completed");
    Ok(())
}

async fn run_session<S: InventoryStore>(service: InventoryService<S>) {
    let mut view = InventoryView::new(service);

    let span = tracing::info_span!("session");
    async {
        view.load().await;
        info!(count = view.items().len(), "Inventory loaded");

        view.open_dialog();
        view.set_item_name("Banana");
        view.submit_item_name().await;
        view.add_item("banana").await;
        view.add_item("Apple").await;
        view.remove_item("BANANA").await;

        view.set_search_term("an");
        for item in view.visible_items() {
            info!(item = %item.display_name(), quantity = item.quantity, "Matching item");
        }

        view.remove_item("banana").await;
        view.remove_item("apple").await;

        if let Some(message) = view.error() {
            warn!(notice = message, "Session ended with an error");
        }
    }
    .instrument(span)
    .await;
}
