use crate::state::{InventoryItem, ItemId, LootKind};

/// Read-only access to the shop catalog and the loot drop table.
pub trait CatalogOracle: Send + Sync {
    fn shop_item(&self, id: &ItemId) -> Option<&ShopItem>;

    /// Weighted loot tiers consulted on every successful drop roll.
    fn loot_table(&self) -> &[LootEntry];
}

/// Cosmetic category of a shop item. The engine only tracks the purchase;
/// applying the cosmetic is the presentation layer's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum CosmeticKind {
    Theme,
    Avatar,
    Confetti,
}

/// A purchasable catalog entry. Price 0 marks starter items that are owned
/// without a purchase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ShopItem {
    pub id: ItemId,
    pub name: String,
    pub kind: CosmeticKind,
    pub price: u64,
}

impl ShopItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, kind: CosmeticKind, price: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            price,
        }
    }
}

/// One weighted tier of the loot table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LootEntry {
    pub id: ItemId,
    pub name: String,
    pub kind: LootKind,
    pub description: String,
    pub weight: u32,
}

impl LootEntry {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        kind: LootKind,
        description: impl Into<String>,
        weight: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: description.into(),
            weight,
        }
    }

    /// Materializes a single dropped item from this tier.
    pub fn to_item(&self) -> InventoryItem {
        InventoryItem {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            description: self.description.clone(),
            count: 1,
        }
    }
}
