//! Quest records and their derived lifecycle.
//!
//! Expiry is never stored: it is re-derived from `deadline` and "now" on
//! every read, so a quest can move into `Failed` without a single write.

use chrono::{DateTime, Utc};

use super::common::{QuestId, SubtaskId};

/// Quest flavor. Boss quests derive their HP bar from subtask completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum QuestKind {
    #[default]
    Normal,
    Boss,
}

/// Reward difficulty tier, derived from the boss flag or XP thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Boss,
}

/// Derived lifecycle state. `Completed` is absorbing; `Failed` is
/// recoverable through the normal completion path (late finish).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestLifecycle {
    Active,
    Completed,
    Failed,
}

/// A checklist item ("minion"). For boss quests it is the unit of damage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subtask {
    pub id: SubtaskId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub completed: bool,
}

impl Subtask {
    pub fn new(id: SubtaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Boss HP on the 0-100 percent scale: the share of subtasks still open.
///
/// Defined as 100 for an empty subtask list. Because HP is a ratio, adding
/// a subtask to a partially damaged boss raises its HP (more remaining
/// work) - deliberate, and covered by tests.
pub fn remaining_hp(total: usize, completed: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    let remaining = total.saturating_sub(completed);
    ((remaining * 100) / total) as u32
}

/// A unit of work tracked for reward.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: QuestKind,
    pub xp_reward: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deadline: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub subtasks: Vec<Subtask>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub completed: bool,
}

impl Quest {
    pub fn new(id: QuestId, title: impl Into<String>, kind: QuestKind, xp_reward: u64) -> Self {
        let (hp, max_hp) = match kind {
            QuestKind::Boss => (100, 100),
            QuestKind::Normal => (0, 0),
        };
        Self {
            id,
            title: title.into(),
            kind,
            xp_reward,
            hp,
            max_hp,
            deadline: None,
            subtasks: Vec::new(),
            completed: false,
        }
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// True when the deadline has passed and the quest is still open.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(deadline) => deadline < now && !self.completed,
            None => false,
        }
    }

    /// Derived lifecycle state at `now`.
    pub fn lifecycle(&self, now: DateTime<Utc>) -> QuestLifecycle {
        if self.completed {
            QuestLifecycle::Completed
        } else if self.is_expired(now) {
            QuestLifecycle::Failed
        } else {
            QuestLifecycle::Active
        }
    }

    /// HP derived from the current subtask list via [`remaining_hp`].
    pub fn derived_hp(&self) -> u32 {
        let completed = self.subtasks.iter().filter(|task| task.completed).count();
        remaining_hp(self.subtasks.len(), completed)
    }

    /// Recomputes the stored HP for boss quests. Normal quests keep 0.
    pub fn recompute_hp(&mut self) {
        if self.kind == QuestKind::Boss {
            self.hp = self.derived_hp();
        }
    }

    pub fn subtask(&self, id: SubtaskId) -> Option<&Subtask> {
        self.subtasks.iter().find(|task| task.id == id)
    }

    pub fn subtask_mut(&mut self, id: SubtaskId) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|task| task.id == id)
    }
}
