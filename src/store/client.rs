//! # Collection Client
//!
//! The cloneable handle used to talk to a [`CollectionActor`](super::CollectionActor).

use crate::model::InventoryItem;
use crate::store::message::StoreRequest;
use crate::store::{InventoryStore, StoreError};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// A client for an in-process collection.
///
/// Holds only a sender, so cloning is cheap and clones can be shared across
/// tasks. The actor shuts down once every clone has been dropped.
#[derive(Clone)]
pub struct CollectionClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl CollectionClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, StoreError>>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}

#[async_trait]
impl InventoryStore for CollectionClient {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        debug!("Sending request");
        let key = key.to_string();
        self.request(|respond_to| StoreRequest::Get { key, respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn set(&self, key: &str, quantity: u32) -> Result<(), StoreError> {
        debug!("Sending request");
        let key = key.to_string();
        self.request(|respond_to| StoreRequest::Set {
            key,
            quantity,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        debug!("Sending request");
        let key = key.to_string();
        self.request(|respond_to| StoreRequest::Delete { key, respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<InventoryItem>, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::List { respond_to })
            .await
    }
}
