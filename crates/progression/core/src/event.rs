//! UI-facing events emitted by the engine.
//!
//! Transitions return events instead of performing side effects: the
//! presentation layer interprets them into toasts, sounds, and confetti.
//! The engine never calls into UI, audio, or storage code.

use crate::state::{
    AchievementId, Difficulty, InventoryItem, ItemId, QuestId, RaidId, SkillId, UserClass,
};

/// One notification for the presentation layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "camelCase"))]
pub enum Event {
    QuestCompleted {
        quest: QuestId,
        difficulty: Difficulty,
        xp: u64,
        gold: u64,
    },
    BossDefeated {
        quest: QuestId,
    },
    CriticalHit,
    LevelUp {
        new_level: u32,
    },
    ItemDropped {
        item: InventoryItem,
    },
    AchievementUnlocked {
        id: AchievementId,
    },
    StreakExtended {
        streak: u32,
        gold: u64,
        xp: u64,
    },
    SkillUnlocked {
        id: SkillId,
    },
    ItemPurchased {
        id: ItemId,
        price: u64,
    },
    ClassSelected {
        class: UserClass,
    },
    FocusSessionCompleted {
        xp: u64,
        gold: u64,
        minutes: u64,
    },
    RaidStarted {
        id: RaidId,
    },
    RaidCleared {
        gold: u64,
        xp: u64,
    },
    /// A recoverable rule violation surfaced to the UI instead of applied.
    Error {
        code: String,
    },
}
