//! Loot inventory with merge-by-id semantics.

use super::common::ItemId;

/// Loot rarity tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum LootKind {
    Potion,
    Scroll,
    Key,
}

/// A stack of identical loot items. `count` is always at least 1; a stack
/// whose count reaches 0 is removed from the inventory entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: LootKind,
    pub description: String,
    pub count: u32,
}

/// The player's loot, one entry per distinct item id.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, id: &ItemId) -> u32 {
        self.items
            .iter()
            .find(|item| &item.id == id)
            .map_or(0, |item| item.count)
    }

    /// Merges a dropped item into the inventory: identical ids sum their
    /// counts, new ids are appended.
    pub fn add(&mut self, item: InventoryItem) {
        match self.items.iter_mut().find(|held| held.id == item.id) {
            Some(held) => held.count += item.count,
            None => self.items.push(item),
        }
    }

    /// Removes up to `count` items with the given id. A stack reaching 0 is
    /// dropped from the list. Returns how many were actually removed.
    pub fn remove(&mut self, id: &ItemId, count: u32) -> u32 {
        let Some(index) = self.items.iter().position(|item| &item.id == id) else {
            return 0;
        };
        let held = &mut self.items[index];
        let removed = held.count.min(count);
        held.count -= removed;
        if held.count == 0 {
            self.items.remove(index);
        }
        removed
    }
}
