//! # Inventory Service
//!
//! Add, remove and refresh on top of any [`InventoryStore`].
//!
//! Each record moves between two states, `Absent` and `Present(q)`:
//!
//! | Operation | Absent         | Present(1)  | Present(q > 1)  |
//! |-----------|----------------|-------------|-----------------|
//! | `add`     | Present(1)     | Present(2)  | Present(q + 1)  |
//! | `remove`  | Absent (no-op) | Absent      | Present(q - 1)  |
//!
//! Both mutations read the record, write the new state, then list the whole
//! collection so the caller can redraw. The read and the write are separate
//! store requests: two concurrent updates of the same item can both read the
//! same quantity, and the later write wins.

mod outcome;

pub use outcome::*;

use crate::model::{normalize_item_name, InventoryItem};
use crate::store::{InventoryStore, StoreError};
use tracing::{debug, info, instrument};

/// Stateless inventory operations over a store.
#[derive(Clone)]
pub struct InventoryService<S> {
    store: S,
}

impl<S: InventoryStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds one unit of `name`, creating the record if needed.
    #[instrument(skip(self))]
    pub async fn add(&self, name: &str) -> Result<Synced<AddOutcome>, StoreError> {
        let key = normalize_item_name(name);
        let outcome = match self.store.get(&key).await? {
            None => {
                self.store.set(&key, 1).await?;
                AddOutcome::Created
            }
            Some(quantity) => {
                let quantity = quantity
                    .checked_add(1)
                    .ok_or_else(|| StoreError::QuantityOverflow(key.clone()))?;
                self.store.set(&key, quantity).await?;
                AddOutcome::Incremented { quantity }
            }
        };
        info!(%key, ?outcome, "Item added");
        let inventory = self.refresh().await?;
        Ok(Synced { outcome, inventory })
    }

    /// Removes one unit of `name`, deleting the record at zero.
    ///
    /// Removing an item that has no record is not an error.
    #[instrument(skip(self))]
    pub async fn remove(&self, name: &str) -> Result<Synced<RemoveOutcome>, StoreError> {
        let key = normalize_item_name(name);
        let outcome = match self.store.get(&key).await? {
            None => RemoveOutcome::Absent,
            Some(quantity) if quantity <= 1 => {
                self.store.delete(&key).await?;
                RemoveOutcome::Deleted
            }
            Some(quantity) => {
                let quantity = quantity - 1;
                self.store.set(&key, quantity).await?;
                RemoveOutcome::Decremented { quantity }
            }
        };
        info!(%key, ?outcome, "Item removed");
        let inventory = self.refresh().await?;
        Ok(Synced { outcome, inventory })
    }

    /// Lists every record in the collection.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let items = self.store.list_all().await?;
        debug!(count = items.len(), "Inventory refreshed");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::MockStore;
    use crate::store::CollectionActor;
    use proptest::prelude::*;

    #[tokio::test]
    async fn test_add_creates_then_refreshes() {
        let mut mock = MockStore::new();
        mock.expect_get("banana").return_ok(None);
        mock.expect_set("banana", 1).return_ok();
        mock.expect_list().return_ok(vec![InventoryItem::new("banana", 1)]);

        let service = InventoryService::new(mock.store());
        let synced = service.add("Banana").await.unwrap();

        assert_eq!(synced.outcome, AddOutcome::Created);
        assert_eq!(synced.inventory, vec![InventoryItem::new("banana", 1)]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_add_increments_existing() {
        let mut mock = MockStore::new();
        mock.expect_get("banana").return_ok(Some(4));
        mock.expect_set("banana", 5).return_ok();
        mock.expect_list().return_ok(vec![InventoryItem::new("banana", 5)]);

        let service = InventoryService::new(mock.store());
        let synced = service.add("BANANA").await.unwrap();

        assert_eq!(synced.outcome, AddOutcome::Incremented { quantity: 5 });
        mock.verify();
    }

    #[tokio::test]
    async fn test_add_at_max_quantity_does_not_write() {
        let mut mock = MockStore::new();
        mock.expect_get("banana").return_ok(Some(u32::MAX));

        let service = InventoryService::new(mock.store());
        let result = service.add("banana").await;

        assert!(matches!(result, Err(StoreError::QuantityOverflow(ref key)) if key == "banana"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_remove_last_unit_deletes() {
        let mut mock = MockStore::new();
        mock.expect_get("banana").return_ok(Some(1));
        mock.expect_delete("banana").return_ok();
        mock.expect_list().return_ok(vec![]);

        let service = InventoryService::new(mock.store());
        let synced = service.remove("Banana").await.unwrap();

        assert_eq!(synced.outcome, RemoveOutcome::Deleted);
        assert!(synced.inventory.is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_remove_decrements() {
        let mut mock = MockStore::new();
        mock.expect_get("banana").return_ok(Some(3));
        mock.expect_set("banana", 2).return_ok();
        mock.expect_list().return_ok(vec![InventoryItem::new("banana", 2)]);

        let service = InventoryService::new(mock.store());
        let synced = service.remove("banana").await.unwrap();

        assert_eq!(synced.outcome, RemoveOutcome::Decremented { quantity: 2 });
        mock.verify();
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop_but_refreshes() {
        let mut mock = MockStore::new();
        mock.expect_get("kiwi").return_ok(None);
        mock.expect_list().return_ok(vec![InventoryItem::new("banana", 2)]);

        let service = InventoryService::new(mock.store());
        let synced = service.remove("Kiwi").await.unwrap();

        assert_eq!(synced.outcome, RemoveOutcome::Absent);
        assert_eq!(synced.outcome.message(), None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_read_failure_stops_before_write() {
        let mut mock = MockStore::new();
        mock.expect_get("banana").return_err(StoreError::PermissionDenied("denied".to_string()));

        let service = InventoryService::new(mock.store());
        let result = service.add("banana").await;

        assert!(matches!(result, Err(StoreError::PermissionDenied(_))));
        mock.verify();
    }

    #[tokio::test]
    async fn test_refresh_failure_after_committed_write() {
        let mut mock = MockStore::new();
        mock.expect_get("banana").return_ok(Some(1));
        mock.expect_set("banana", 2).return_ok();
        mock.expect_list().return_err(StoreError::QuotaExceeded("slow down".to_string()));

        let service = InventoryService::new(mock.store());
        let result = service.add("banana").await;

        assert!(matches!(result, Err(StoreError::QuotaExceeded(_))));
        mock.verify();
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(String),
        Remove(String),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let name = prop::sample::select(vec!["apple", "Apple", "APPLE", "pear", "Pear"]);
        prop_oneof![
            name.clone().prop_map(|n| Op::Add(n.to_string())),
            name.prop_map(|n| Op::Remove(n.to_string())),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Any sequence of adds and removes leaves the store matching a simple
        /// per-key counter, with no zero-quantity records.
        #[test]
        fn prop_store_matches_counter_model(ops in prop::collection::vec(op_strategy(), 0..24)) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            let (stored, expected) = runtime.block_on(async move {
                let (actor, client) = CollectionActor::new("inventory", 16);
                tokio::spawn(actor.run());
                let service = InventoryService::new(client);

                let mut model = std::collections::BTreeMap::<String, u32>::new();
                for op in ops {
                    match op {
                        Op::Add(name) => {
                            service.add(&name).await.unwrap();
                            *model.entry(name.to_lowercase()).or_insert(0) += 1;
                        }
                        Op::Remove(name) => {
                            service.remove(&name).await.unwrap();
                            let key = name.to_lowercase();
                            match model.get(&key).copied() {
                                Some(1) => { model.remove(&key); }
                                Some(q) => { model.insert(key, q - 1); }
                                None => {}
                            }
                        }
                    }
                }
                (service.refresh().await.unwrap(), model)
            });

            prop_assert!(stored.iter().all(|item| item.quantity > 0));
            let stored: Vec<(String, u32)> =
                stored.into_iter().map(|i| (i.name, i.quantity)).collect();
            let expected: Vec<(String, u32)> = expected.into_iter().collect();
            prop_assert_eq!(stored, expected);
        }
    }
}
