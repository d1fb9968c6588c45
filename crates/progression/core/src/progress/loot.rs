//! Probability-weighted loot drops.

use crate::env::{GameEnv, OracleError};
use crate::state::{InventoryItem, QuestKind};

/// Rolls for a loot drop after a quest completion.
///
/// The drop check uses the quest-kind probability from the rules table; on
/// success a tier is picked from the weighted loot table. Returns the
/// dropped item (count 1) or `None`. Merging into the inventory is the
/// caller's responsibility.
pub fn roll_loot(
    kind: QuestKind,
    env: &GameEnv<'_>,
    drop_seed: u64,
    pick_seed: u64,
) -> Result<Option<InventoryItem>, OracleError> {
    let rules = env.rules()?.rules();
    let rng = env.rng()?;

    let chance = rules.drop_chance(kind);
    if f64::from(rng.roll_d100(drop_seed)) > chance * 100.0 {
        return Ok(None);
    }

    let table = env.catalog()?.loot_table();
    let total_weight: u32 = table.iter().map(|entry| entry.weight).sum();
    if total_weight == 0 {
        return Ok(None);
    }

    let mut pick = rng.next_u32(pick_seed) % total_weight;
    for entry in table {
        if pick < entry.weight {
            return Ok(Some(entry.to_item()));
        }
        pick -= entry.weight;
    }

    // Unreachable: pick < total_weight and the weights sum to total_weight.
    Ok(None)
}
