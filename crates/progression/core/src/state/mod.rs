//! Authoritative engine state representation.
//!
//! This module owns the record types the engine mutates: the player profile,
//! quest list, loot inventory, purchased cosmetics, and the optional raid
//! encounter. Runtime layers clone or query this state but mutate it
//! exclusively through the engine.

mod common;
mod inventory;
mod profile;
mod quest;
mod raid;

use std::collections::BTreeSet;

pub use common::{AchievementId, ItemId, QuestId, RaidId, SkillId, SubtaskId};
pub use inventory::{Inventory, InventoryItem, LootKind};
pub use profile::{HistoryEntry, Profile, StatCounter, StatCounters, UserClass};
pub use quest::{Difficulty, Quest, QuestKind, QuestLifecycle, Subtask, remaining_hp};
pub use raid::{BossKind, RaidEncounter, RaidStatus};

use crate::error::{EngineError, ErrorSeverity};

/// Profile invariant breakage detected after a transition.
///
/// These are internal-consistency failures: the transition is rolled back,
/// nothing is persisted, and the error propagates with `Internal` severity
/// so a rules-table bug is never masked by clamping.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    #[error("xp {xp} at or above max_xp {max_xp} after update")]
    XpAtOrAboveMax { xp: u64, max_xp: u64 },

    #[error("max_xp reached zero")]
    ZeroMaxXp,

    #[error("level reached zero")]
    ZeroLevel,

    #[error("boss quest {quest} stores hp {stored} but subtasks derive {derived}")]
    BossHpDesync {
        quest: QuestId,
        stored: u32,
        derived: u32,
    },
}

impl EngineError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::XpAtOrAboveMax { .. } => "xp_at_or_above_max",
            Self::ZeroMaxXp => "zero_max_xp",
            Self::ZeroLevel => "zero_level",
            Self::BossHpDesync { .. } => "boss_hp_desync",
        }
    }
}

/// Canonical snapshot of everything the engine is allowed to mutate.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct EngineState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at profile creation and never modified. Combined with
    /// `nonce` to derive unique seeds for each random event.
    pub seed: u64,

    /// Sequential action counter, incremented once per executed action.
    pub nonce: u64,

    pub profile: Profile,
    pub quests: Vec<Quest>,
    pub inventory: Inventory,
    pub active_raid: Option<RaidEncounter>,
    pub purchased_items: BTreeSet<ItemId>,
}

impl EngineState {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    pub fn with_seed(seed: u64, profile: Profile) -> Self {
        Self {
            seed,
            profile,
            ..Self::default()
        }
    }

    pub fn quest(&self, id: QuestId) -> Option<&Quest> {
        self.quests.iter().find(|quest| quest.id == id)
    }

    pub fn quest_mut(&mut self, id: QuestId) -> Option<&mut Quest> {
        self.quests.iter_mut().find(|quest| quest.id == id)
    }

    /// Verifies the profile and quest invariants that must hold after any
    /// completed update.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let profile = &self.profile;
        if profile.max_xp == 0 {
            return Err(InvariantViolation::ZeroMaxXp);
        }
        if profile.level == 0 {
            return Err(InvariantViolation::ZeroLevel);
        }
        if profile.xp >= profile.max_xp {
            return Err(InvariantViolation::XpAtOrAboveMax {
                xp: profile.xp,
                max_xp: profile.max_xp,
            });
        }
        for quest in &self.quests {
            // Completed bosses store hp 0 with all subtasks marked done, so
            // the derivation check holds for them as well.
            if quest.kind == QuestKind::Boss && quest.hp != quest.derived_hp() {
                return Err(InvariantViolation::BossHpDesync {
                    quest: quest.id,
                    stored: quest.hp,
                    derived: quest.derived_hp(),
                });
            }
        }
        Ok(())
    }
}
