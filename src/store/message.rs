//! # Collection Messages
//!
//! The requests a [`CollectionClient`](super::CollectionClient) sends to a
//! [`CollectionActor`](super::CollectionActor), one variant per store operation.

use crate::model::InventoryItem;
use crate::store::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the collection actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to the collection actor.
///
/// Keys are expected to be normalized already; the actor stores whatever key it
/// is given.
#[derive(Debug)]
pub enum StoreRequest {
    Get {
        key: String,
        respond_to: Response<Option<u32>>,
    },
    Set {
        key: String,
        quantity: u32,
        respond_to: Response<()>,
    },
    Delete {
        key: String,
        respond_to: Response<()>,
    },
    List {
        respond_to: Response<Vec<InventoryItem>>,
    },
}
