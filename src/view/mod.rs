//! # Inventory View
//!
//! The local state a presentation layer keeps around the service: the last
//! listed inventory, the search term, the add-item dialog and the notices.
//!
//! This is the error boundary of the application. Service failures are logged
//! here and turned into one generic notice; the displayed items stay as they
//! were.

use crate::model::{filter_items, InventoryItem};
use crate::service::InventoryService;
use crate::store::{InventoryStore, StoreError};
use tracing::{error, info};

/// Shown for every failed operation, whatever the cause.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Presentation-layer state for a single inventory page.
pub struct InventoryView<S> {
    service: InventoryService<S>,
    items: Vec<InventoryItem>,
    search_term: String,
    dialog_open: bool,
    item_name: String,
    error: Option<String>,
    success: Option<String>,
}

impl<S: InventoryStore> InventoryView<S> {
    pub fn new(service: InventoryService<S>) -> Self {
        Self {
            service,
            items: Vec::new(),
            search_term: String::new(),
            dialog_open: false,
            item_name: String::new(),
            error: None,
            success: None,
        }
    }

    /// Loads the inventory for the first time.
    pub async fn load(&mut self) {
        match self.service.refresh().await {
            Ok(items) => self.items = items,
            Err(e) => self.fail("refresh", e),
        }
    }

    /// Adds one unit of `name`.
    pub async fn add_item(&mut self, name: &str) {
        match self.service.add(name).await {
            Ok(synced) => {
                self.items = synced.inventory;
                self.succeed(synced.outcome.message());
            }
            Err(e) => self.fail("add", e),
        }
    }

    /// Removes one unit of `name`.
    pub async fn remove_item(&mut self, name: &str) {
        match self.service.remove(name).await {
            Ok(synced) => {
                self.items = synced.inventory;
                self.succeed(synced.outcome.message());
            }
            Err(e) => self.fail("remove", e),
        }
    }

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    pub fn set_item_name(&mut self, name: impl Into<String>) {
        self.item_name = name.into();
    }

    /// Adds the item typed into the dialog, then clears the input and closes
    /// the dialog. Surrounding whitespace is dropped; blank input is ignored
    /// and leaves the dialog open.
    pub async fn submit_item_name(&mut self) {
        if self.item_name.trim().is_empty() {
            return;
        }
        let name = std::mem::take(&mut self.item_name);
        self.close_dialog();
        self.add_item(name.trim()).await;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// The items matching the current search term.
    pub fn visible_items(&self) -> Vec<&InventoryItem> {
        filter_items(&self.items, &self.search_term)
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn dismiss_success(&mut self) {
        self.success = None;
    }

    fn succeed(&mut self, message: Option<&'static str>) {
        if let Some(message) = message {
            info!(notice = message, "Operation succeeded");
            self.success = Some(message.to_string());
        }
    }

    fn fail(&mut self, operation: &'static str, e: StoreError) {
        error!(operation, error = %e, "Inventory operation failed");
        self.error = Some(GENERIC_ERROR_MESSAGE.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::MockStore;
    use crate::store::CollectionActor;

    fn view_over_actor() -> InventoryView<crate::store::CollectionClient> {
        let (actor, client) = CollectionActor::new("inventory", 16);
        tokio::spawn(actor.run());
        InventoryView::new(InventoryService::new(client))
    }

    #[tokio::test]
    async fn test_add_and_remove_update_items_and_notices() {
        let mut view = view_over_actor();
        view.load().await;
        assert!(view.items().is_empty());

        view.add_item("Banana").await;
        assert_eq!(view.items(), &[InventoryItem::new("banana", 1)]);
        assert_eq!(view.success(), Some("Item added successfully!"));

        view.add_item("banana").await;
        assert_eq!(view.success(), Some("Item quantity updated successfully!"));

        view.remove_item("BANANA").await;
        assert_eq!(view.items(), &[InventoryItem::new("banana", 1)]);
        assert_eq!(view.success(), Some("Item quantity decreased successfully!"));

        view.remove_item("banana").await;
        assert!(view.items().is_empty());
        assert_eq!(view.success(), Some("Item removed successfully!"));

        view.dismiss_success();
        view.remove_item("banana").await;
        assert_eq!(view.success(), None);
        assert_eq!(view.error(), None);
    }

    #[tokio::test]
    async fn test_failure_keeps_items_and_sets_generic_error() {
        let mut mock = MockStore::new();
        mock.expect_list().return_ok(vec![InventoryItem::new("apple", 2)]);
        mock.expect_get("apple").return_err(StoreError::PermissionDenied("denied".to_string()));

        let mut view = InventoryView::new(InventoryService::new(mock.store()));
        view.load().await;
        view.add_item("apple").await;

        assert_eq!(view.items(), &[InventoryItem::new("apple", 2)]);
        assert_eq!(view.error(), Some(GENERIC_ERROR_MESSAGE));
        assert_eq!(view.success(), None);

        view.dismiss_error();
        assert_eq!(view.error(), None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_failed_load_keeps_items() {
        let mut mock = MockStore::new();
        mock.expect_list().return_ok(vec![InventoryItem::new("apple", 2)]);
        mock.expect_list().return_err(StoreError::QuotaExceeded("slow down".to_string()));

        let mut view = InventoryView::new(InventoryService::new(mock.store()));
        view.load().await;
        view.load().await;

        assert_eq!(view.items(), &[InventoryItem::new("apple", 2)]);
        assert_eq!(view.error(), Some(GENERIC_ERROR_MESSAGE));
        mock.verify();
    }

    /// The decrement is committed, but the view keeps what it last listed.
    #[tokio::test]
    async fn test_refresh_failure_after_remove_keeps_items() {
        let mut mock = MockStore::new();
        mock.expect_list().return_ok(vec![InventoryItem::new("apple", 2)]);
        mock.expect_get("apple").return_ok(Some(2));
        mock.expect_set("apple", 1).return_ok();
        mock.expect_list().return_err(StoreError::PermissionDenied("denied".to_string()));

        let mut view = InventoryView::new(InventoryService::new(mock.store()));
        view.load().await;
        view.remove_item("Apple").await;

        assert_eq!(view.items(), &[InventoryItem::new("apple", 2)]);
        assert_eq!(view.error(), Some(GENERIC_ERROR_MESSAGE));
        assert_eq!(view.success(), None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_padded_dialog_input_merges_into_existing_item() {
        let mut view = view_over_actor();
        view.add_item("apple").await;

        view.open_dialog();
        view.set_item_name("  Apple\t");
        view.submit_item_name().await;

        assert_eq!(view.items(), &[InventoryItem::new("apple", 2)]);
        assert_eq!(view.success(), Some("Item quantity updated successfully!"));
    }

    #[tokio::test]
    async fn test_dialog_submission() {
        let mut view = view_over_actor();

        view.open_dialog();
        view.set_item_name("   ");
        view.submit_item_name().await;
        assert!(view.is_dialog_open());
        assert!(view.items().is_empty());

        view.set_item_name("  Green Apple ");
        view.submit_item_name().await;
        assert!(!view.is_dialog_open());
        assert_eq!(view.item_name(), "");
        assert_eq!(view.items(), &[InventoryItem::new("green apple", 1)]);
    }

    #[tokio::test]
    async fn test_search_filters_visible_items() {
        let mut view = view_over_actor();
        for name in ["apple", "pineapple", "banana"] {
            view.add_item(name).await;
        }

        view.set_search_term("APPLE");
        let visible: Vec<&str> = view
            .visible_items()
            .into_iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(visible, vec!["apple", "pineapple"]);

        view.set_search_term("");
        assert_eq!(view.visible_items().len(), 3);
        assert_eq!(view.search_term(), "");
    }
}
