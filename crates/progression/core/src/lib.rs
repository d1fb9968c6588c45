//! Deterministic progression and reward rules for a gamified task tracker.
//!
//! `progression-core` defines the canonical rules (actions, engine, player
//! state) and exposes pure APIs reusable by the runtime and offline tools.
//! All state mutation flows through [`engine::Engine`], randomness and time
//! enter only through [`env`] oracles, and supporting crates depend on the
//! types re-exported here.

pub mod achievements;
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod progress;
pub mod state;

#[cfg(test)]
mod testutil;

pub use action::{
    AbandonRaidAction, Action, ActionTransition, ActivityKind, AddQuestAction, AddRaidTaskAction,
    AddSubtaskAction, CompleteFocusSessionAction, CompleteQuestAction, DailyLoginAction,
    DamageRaidTaskAction, DamageSubtaskAction, DeleteQuestAction, LoginError, ProfileError,
    PurchaseError, PurchaseItemAction, QuestError, RaidError, RecordActivityAction,
    SelectClassAction, SkillError, StartRaidAction, UnlockSkillAction,
};
pub use config::RulesConfig;
pub use engine::{Engine, ExecuteError, ExecutionOutcome, TransitionPhase, TransitionPhaseError};
pub use env::{
    AchievementCondition, AchievementDefinition, AchievementOracle, CatalogOracle, ClockOracle,
    CosmeticKind, Env, FixedClock, GameEnv, LootEntry, OracleError, PcgRng, RngOracle, RulesOracle,
    ShopItem, SkillDefinition, SkillEffect, SkillOracle, compute_seed, roll_context,
};
pub use error::{EngineError, ErrorSeverity};
pub use event::Event;
pub use progress::{
    EarningsOutcome, ProgressError, RewardMultipliers, apply_earnings, resolve_focus_bonus,
    resolve_multipliers, resolve_shop_discount, roll_loot,
};
pub use state::{
    AchievementId, BossKind, Difficulty, EngineState, HistoryEntry, Inventory, InventoryItem,
    InvariantViolation, ItemId, LootKind, Profile, Quest, QuestId, QuestKind, QuestLifecycle,
    RaidEncounter, RaidId, RaidStatus, SkillId, StatCounter, StatCounters, Subtask, SubtaskId,
    UserClass, remaining_hp,
};
