//! # Collection Actor
//!
//! This module defines the `CollectionActor`, an in-process document collection.
//! It implements the "Server" side of the Actor Model: it owns the records and
//! processes requests sequentially, so no lock guards the map.

use crate::model::InventoryItem;
use crate::store::client::CollectionClient;
use crate::store::message::StoreRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The actor that owns one collection of inventory records.
///
/// # Concurrency Model
/// Each request is handled to completion before the next one is received, which
/// makes every single `get`/`set`/`delete`/`list` atomic. A read followed by a
/// write issued as two requests is not atomic; another client may slip in
/// between them.
///
/// ```rust
/// use inventory_tracker::store::{CollectionActor, InventoryStore};
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = CollectionActor::new("inventory", 16);
///     tokio::spawn(actor.run());
///
///     client.set("apple", 2).await.unwrap();
///     assert_eq!(client.get("apple").await.unwrap(), Some(2));
/// }
/// ```
pub struct CollectionActor {
    name: String,
    receiver: mpsc::Receiver<StoreRequest>,
    records: BTreeMap<String, u32>,
}

impl CollectionActor {
    pub fn new(name: impl Into<String>, buffer_size: usize) -> (Self, CollectionClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            name: name.into(),
            receiver,
            records: BTreeMap::new(),
        };
        let client = CollectionClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self) {
        let collection = self.name.as_str();
        info!(collection, "Collection started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Get { key, respond_to } => {
                    let quantity = self.records.get(&key).copied();
                    debug!(collection, %key, found = quantity.is_some(), "Get");
                    let _ = respond_to.send(Ok(quantity));
                }
                StoreRequest::Set {
                    key,
                    quantity,
                    respond_to,
                } => {
                    debug!(collection, %key, quantity, "Set");
                    self.records.insert(key.clone(), quantity);
                    info!(collection, %key, quantity, size = self.records.len(), "Stored");
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Delete { key, respond_to } => {
                    debug!(collection, %key, "Delete");
                    if self.records.remove(&key).is_some() {
                        info!(collection, %key, size = self.records.len(), "Deleted");
                    }
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::List { respond_to } => {
                    debug!(collection, size = self.records.len(), "List");
                    let items = self
                        .records
                        .iter()
                        .map(|(name, quantity)| InventoryItem::new(name.clone(), *quantity))
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
            }
        }

        info!(collection, size = self.records.len(), "Shutdown");
    }
}
