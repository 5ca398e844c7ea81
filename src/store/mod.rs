//! # Inventory Store
//!
//! The binding between the service and a document collection of
//! "item name → quantity" records.
//!
//! ## Main Components
//!
//! - [`InventoryStore`] - The async contract every backend implements
//! - [`CollectionActor`] / [`CollectionClient`] - An in-process collection run as a Tokio actor
//! - [`FirestoreStore`] - The remote collection over the Firestore REST API
//! - [`StoreError`] - The single error type all backends report
//!
//! # Testing
//!
//! See the [`mock`] module for an expectation-driven store that needs no actor
//! and no network.

pub mod actor;
pub mod client;
pub mod error;
pub mod firestore;
pub mod message;
pub mod mock;

pub use actor::CollectionActor;
pub use client::CollectionClient;
pub use error::StoreError;
pub use firestore::FirestoreStore;
pub use message::{Response, StoreRequest};

use crate::model::InventoryItem;
use async_trait::async_trait;

/// Key/value access to the inventory collection.
///
/// Keys handed to a store are already normalized; stores never change case.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Reads the quantity stored under `key`, or `None` if there is no record.
    async fn get(&self, key: &str) -> Result<Option<u32>, StoreError>;

    /// Writes `quantity` under `key`, replacing any existing record.
    async fn set(&self, key: &str, quantity: u32) -> Result<(), StoreError>;

    /// Removes the record under `key`. Removing a missing record succeeds.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Snapshot of the whole collection. Callers must not rely on the order.
    async fn list_all(&self) -> Result<Vec<InventoryItem>, StoreError>;
}
