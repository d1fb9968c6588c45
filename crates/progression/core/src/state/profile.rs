//! Player profile: the single source of truth for progression.
//!
//! The profile is passed by value through every transition and replaced
//! wholesale on success. Nothing in this module touches the clock or the
//! store; calendar dates arrive from the caller.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::common::{AchievementId, SkillId};

/// Character class selected by the player. Fixed at creation, mutable by
/// re-selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UserClass {
    #[default]
    Novice,
    Warrior,
    Rogue,
    Wizard,
}

/// Monotonically non-decreasing lifetime counters driving achievements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct StatCounters {
    pub quests_completed: u64,
    pub bosses_defeated: u64,
    pub total_gold_earned: u64,
    pub notes_created: u64,
    pub items_bought: u64,
    pub tabs_restored: u64,
}

/// Names of the individual counters, used by data-driven achievement
/// conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum StatCounter {
    QuestsCompleted,
    BossesDefeated,
    TotalGoldEarned,
    NotesCreated,
    ItemsBought,
    TabsRestored,
}

impl StatCounters {
    pub fn get(&self, counter: StatCounter) -> u64 {
        match counter {
            StatCounter::QuestsCompleted => self.quests_completed,
            StatCounter::BossesDefeated => self.bosses_defeated,
            StatCounter::TotalGoldEarned => self.total_gold_earned,
            StatCounter::NotesCreated => self.notes_created,
            StatCounter::ItemsBought => self.items_bought,
            StatCounter::TabsRestored => self.tabs_restored,
        }
    }
}

/// One calendar day of activity, append-or-merge keyed by date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HistoryEntry {
    pub date: NaiveDate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub xp: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub quests: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub focus_minutes: u64,
}

impl HistoryEntry {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            xp: 0,
            gold: 0,
            quests: 0,
            focus_minutes: 0,
        }
    }
}

/// Persistent player state.
///
/// Invariants maintained by the engine after every completed update:
/// `level >= 1`, `max_xp > 0`, `xp < max_xp`. `skill_points` is unsigned and
/// checked at spend time, so it never wraps below zero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Profile {
    pub level: u32,
    pub xp: u64,
    pub max_xp: u64,
    pub gold: u64,
    pub user_class: UserClass,
    pub skill_points: u32,
    pub unlocked_skills: BTreeSet<SkillId>,
    pub stats: StatCounters,
    pub unlocked_achievements: BTreeSet<AchievementId>,
    /// One entry per calendar day with any recorded activity, ordered by date.
    pub history: Vec<HistoryEntry>,
    pub streak: u32,
    #[cfg_attr(feature = "serde", serde(rename = "lastLoginDate"))]
    pub last_login: Option<NaiveDate>,
}

impl Profile {
    pub const STARTING_MAX_XP: u64 = 100;

    pub fn new() -> Self {
        Self {
            level: 1,
            xp: 0,
            max_xp: Self::STARTING_MAX_XP,
            gold: 0,
            user_class: UserClass::Novice,
            skill_points: 0,
            unlocked_skills: BTreeSet::new(),
            stats: StatCounters::default(),
            unlocked_achievements: BTreeSet::new(),
            history: Vec::new(),
            streak: 0,
            last_login: None,
        }
    }

    pub fn with_class(class: UserClass) -> Self {
        Self {
            user_class: class,
            ..Self::new()
        }
    }

    /// Merges activity into the entry for `date`, inserting it (in date
    /// order) if the day has no entry yet. Fields only ever accumulate.
    pub fn merge_history(
        &mut self,
        date: NaiveDate,
        xp: u64,
        gold: u64,
        quests: u32,
        focus_minutes: u64,
    ) {
        let index = match self.history.binary_search_by_key(&date, |entry| entry.date) {
            Ok(index) => index,
            Err(index) => {
                self.history.insert(index, HistoryEntry::empty(date));
                index
            }
        };
        let entry = &mut self.history[index];
        entry.xp += xp;
        entry.gold += gold;
        entry.quests += quests;
        entry.focus_minutes += focus_minutes;
    }

    /// Returns the history entry for `date`, if the day saw any activity.
    pub fn history_for(&self, date: NaiveDate) -> Option<&HistoryEntry> {
        self.history
            .binary_search_by_key(&date, |entry| entry.date)
            .ok()
            .map(|index| &self.history[index])
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}
