//! Saved product stubs.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product saved for later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_sale: bool,
}

/// Ordered list of saved products, at most one entry per id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&WishlistItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Save an item. Returns `false` when the id is already saved.
    pub fn add(&mut self, item: WishlistItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Drop an item by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Drop everything. Returns whether the list was non-empty.
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn stub(id: &str) -> WishlistItem {
        WishlistItem {
            id: ProductId::new(id),
            name: "Diamond Ring".to_string(),
            price: Price::from_rupees(1200),
            original_price: None,
            image: "/placeholder.svg?height=60&width=60".to_string(),
            category: Some("Rings".to_string()),
            is_new: false,
            is_sale: false,
        }
    }

    #[test]
    fn test_add_then_remove_restores_prior_state() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.add(stub("1")));
        let before = wishlist.clone();

        assert!(wishlist.add(stub("2")));
        assert!(wishlist.remove(&ProductId::new("2")));

        assert_eq!(wishlist, before);
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.add(stub("1")));
        assert!(!wishlist.add(stub("1")));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_remove_and_clear_report_changes() {
        let mut wishlist = Wishlist::new();
        assert!(!wishlist.remove(&ProductId::new("missing")));
        assert!(!wishlist.clear());

        wishlist.add(stub("1"));
        assert!(wishlist.clear());
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut wishlist = Wishlist::new();
        wishlist.add(stub("1"));
        let json = serde_json::to_value(&wishlist).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "1");
        assert_eq!(json[0]["isNew"], false);
    }
}
