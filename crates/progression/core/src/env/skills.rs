use crate::state::SkillId;

/// Read-only access to skill tree definitions.
pub trait SkillOracle: Send + Sync {
    fn definition(&self, id: &SkillId) -> Option<&SkillDefinition>;

    /// Returns every skill definition known to this oracle.
    fn all_definitions(&self) -> &[SkillDefinition];
}

/// Immutable skill node. Skills form a tree: each node has at most one
/// parent, and unlock order must respect prerequisites.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    pub cost: u32,
    #[cfg_attr(feature = "serde", serde(default, rename = "req"))]
    pub prerequisite: Option<SkillId>,
    pub effect: SkillEffect,
}

impl SkillDefinition {
    pub fn new(
        id: impl Into<SkillId>,
        name: impl Into<String>,
        description: impl Into<String>,
        cost: u32,
        prerequisite: Option<SkillId>,
        effect: SkillEffect,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            cost,
            prerequisite,
            effect,
        }
    }
}

/// What a skill does once unlocked.
///
/// Multiplier bonuses stack additively onto the 1.0 baseline resolved by
/// the multiplier resolver; the remaining effects are consulted by the
/// transitions they concern.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum SkillEffect {
    /// Additive XP multiplier bonus (e.g., 0.05 for +5%).
    XpBonus(f64),

    /// Additive gold multiplier bonus.
    GoldBonus(f64),

    /// Chance for a critical roll that doubles both reward multipliers.
    CriticalChance(f64),

    /// Fractional discount on shop purchases.
    ShopDiscount(f64),

    /// Flat bonus XP on completed focus sessions.
    FocusBonusXp(u64),
}
