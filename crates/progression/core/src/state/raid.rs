//! Raid encounters: the singleton "big boss" session.

use super::common::{RaidId, SubtaskId};
use super::quest::{Subtask, remaining_hp};

/// Boss flavor presets for raid encounters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BossKind {
    Dragon,
    Demon,
    VoidConstruct,
    GoldenDragon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RaidStatus {
    Active,
    Cleared,
    Abandoned,
}

/// A large-scale boss session. At most one encounter exists at a time; HP
/// derivation is the same subtask ratio used by boss quests.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RaidEncounter {
    pub id: RaidId,
    pub name: String,
    pub boss_kind: BossKind,
    pub max_hp: u32,
    pub current_hp: u32,
    pub tasks: Vec<Subtask>,
    pub status: RaidStatus,
}

impl RaidEncounter {
    pub const FULL_HP: u32 = 100;

    pub fn new(id: RaidId, name: impl Into<String>, boss_kind: BossKind) -> Self {
        Self {
            id,
            name: name.into(),
            boss_kind,
            max_hp: Self::FULL_HP,
            current_hp: Self::FULL_HP,
            tasks: Vec::new(),
            status: RaidStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RaidStatus::Active
    }

    pub fn task_mut(&mut self, id: SubtaskId) -> Option<&mut Subtask> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    /// Recomputes HP from the task list via the shared ratio formula.
    pub fn recompute_hp(&mut self) {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        self.current_hp = remaining_hp(self.tasks.len(), completed);
    }
}
