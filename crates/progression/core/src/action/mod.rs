//! Action domain: every state mutation the engine accepts.
//!
//! Each user-facing operation is a small struct implementing
//! [`ActionTransition`]; the engine drives all of them through the same
//! three-phase pipeline (pre_validate → apply → post_validate). Transitions
//! return the UI events they produced instead of performing side effects.
//!
//! # Module Structure
//!
//! - `quest`: quest CRUD, completion, and subtask-driven boss damage
//! - `login`: daily login and streak accounting
//! - `skill`: prerequisite-gated skill unlocks
//! - `shop`: cosmetic purchases with skill discounts
//! - `profile`: class selection, activity counters, focus sessions
//! - `raid`: the singleton raid encounter

pub mod login;
pub mod profile;
pub mod quest;
pub mod raid;
pub mod shop;
pub mod skill;

pub use login::{DailyLoginAction, LoginError};
pub use profile::{
    ActivityKind, CompleteFocusSessionAction, ProfileError, RecordActivityAction,
    SelectClassAction,
};
pub use quest::{
    AddQuestAction, AddSubtaskAction, CompleteQuestAction, DamageSubtaskAction, DeleteQuestAction,
    QuestError,
};
pub use raid::{
    AbandonRaidAction, AddRaidTaskAction, DamageRaidTaskAction, RaidError, StartRaidAction,
};
pub use shop::{PurchaseError, PurchaseItemAction};
pub use skill::{SkillError, UnlockSkillAction};

use crate::achievements;
use crate::env::{GameEnv, OracleError};
use crate::event::Event;
use crate::state::{EngineState, Profile, QuestId};

/// Defines how a concrete action variant mutates engine state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. All hooks
/// receive read-only access to deterministic environment facts via the env
/// and must stay side-effect free.
pub trait ActionTransition {
    type Error;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &EngineState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the engine state directly and returns
    /// the events to surface. Implementations may assume `pre_validate`
    /// has already run successfully.
    fn apply(&self, state: &mut EngineState, env: &GameEnv<'_>)
    -> Result<Vec<Event>, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &EngineState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Top-level action enum dispatched by the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    AddQuest(AddQuestAction),
    AddSubtask(AddSubtaskAction),
    DeleteQuest(DeleteQuestAction),
    CompleteQuest(CompleteQuestAction),
    DamageSubtask(DamageSubtaskAction),
    DailyLogin(DailyLoginAction),
    UnlockSkill(UnlockSkillAction),
    PurchaseItem(PurchaseItemAction),
    SelectClass(SelectClassAction),
    RecordActivity(RecordActivityAction),
    CompleteFocusSession(CompleteFocusSessionAction),
    StartRaid(StartRaidAction),
    AddRaidTask(AddRaidTaskAction),
    DamageRaidTask(DamageRaidTaskAction),
    AbandonRaid(AbandonRaidAction),
}

impl Action {
    /// The quest this action touches, if any. Callers use this to serialize
    /// invocations per quest id.
    pub fn quest_id(&self) -> Option<QuestId> {
        match self {
            Action::AddQuest(action) => Some(action.id),
            Action::AddSubtask(action) => Some(action.quest),
            Action::DeleteQuest(action) => Some(action.quest),
            Action::CompleteQuest(action) => Some(action.quest),
            Action::DamageSubtask(action) => Some(action.quest),
            _ => None,
        }
    }

    /// Returns the snake_case name of the action, used for logging and
    /// error codes.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::AddQuest(_) => "add_quest",
            Action::AddSubtask(_) => "add_subtask",
            Action::DeleteQuest(_) => "delete_quest",
            Action::CompleteQuest(_) => "complete_quest",
            Action::DamageSubtask(_) => "damage_subtask",
            Action::DailyLogin(_) => "daily_login",
            Action::UnlockSkill(_) => "unlock_skill",
            Action::PurchaseItem(_) => "purchase_item",
            Action::SelectClass(_) => "select_class",
            Action::RecordActivity(_) => "record_activity",
            Action::CompleteFocusSession(_) => "complete_focus_session",
            Action::StartRaid(_) => "start_raid",
            Action::AddRaidTask(_) => "add_raid_task",
            Action::DamageRaidTask(_) => "damage_raid_task",
            Action::AbandonRaid(_) => "abandon_raid",
        }
    }
}

/// Runs the achievement sweep over the profile's current stats, merges the
/// newly unlocked ids, and appends one event per unlock.
///
/// Called by every transition that changes a counter or the level.
pub(crate) fn sweep_achievements(
    profile: &mut Profile,
    env: &GameEnv<'_>,
    events: &mut Vec<Event>,
) -> Result<(), OracleError> {
    let definitions = env.achievements()?.all_definitions();
    let newly_unlocked = achievements::evaluate(
        &profile.stats,
        profile.level,
        &profile.unlocked_achievements,
        definitions,
    );
    for id in newly_unlocked {
        profile.unlocked_achievements.insert(id.clone());
        events.push(Event::AchievementUnlocked { id });
    }
    Ok(())
}
