use serde::{Deserialize, Serialize};

/// Lowercases an item name into the key used by the inventory collection.
///
/// Keys are case-insensitive: `"Apple"`, `"APPLE"` and `"apple"` all address
/// the same record. Applying it twice gives the same result as applying it once.
pub fn normalize_item_name(name: &str) -> String {
    name.to_lowercase()
}

/// A stored inventory record.
///
/// `name` is the normalized key of the record and `quantity` is always at least
/// one for anything read back from a store; a record that would drop to zero is
/// deleted instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub quantity: u32,
}

impl InventoryItem {
    /// Creates a new InventoryItem.
    ///
    /// # Arguments
    /// * `name` - Normalized item key
    /// * `quantity` - Units in stock
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    /// The name with its first character uppercased, as shown in the item list.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Case-insensitive substring match against a search term.
    pub fn matches(&self, search_term: &str) -> bool {
        self.name
            .to_lowercase()
            .contains(&search_term.to_lowercase())
    }
}

/// Returns the items whose name contains `search_term`, keeping their order.
pub fn filter_items<'a>(items: &'a [InventoryItem], search_term: &str) -> Vec<&'a InventoryItem> {
    items.iter().filter(|item| item.matches(search_term)).collect()
}
