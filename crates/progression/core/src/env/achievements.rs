use crate::state::{AchievementId, StatCounter, StatCounters};

/// Read-only access to achievement definitions.
pub trait AchievementOracle: Send + Sync {
    fn all_definitions(&self) -> &[AchievementDefinition];
}

/// Immutable achievement rule. Once unlocked, an achievement is never
/// removed from the profile.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AchievementDefinition {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub condition: AchievementCondition,
}

impl AchievementDefinition {
    pub fn new(
        id: impl Into<AchievementId>,
        name: impl Into<String>,
        description: impl Into<String>,
        condition: AchievementCondition,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            condition,
        }
    }
}

/// Data-driven unlock predicate.
///
/// Conditions reference only monotonic counters and the level, so
/// re-evaluating after every stats change is safe: once true, always true.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum AchievementCondition {
    CounterAtLeast {
        counter: StatCounter,
        threshold: u64,
    },
    LevelAtLeast(u32),
}

impl AchievementCondition {
    pub fn is_met(&self, stats: &StatCounters, level: u32) -> bool {
        match *self {
            Self::CounterAtLeast { counter, threshold } => stats.get(counter) >= threshold,
            Self::LevelAtLeast(required) => level >= required,
        }
    }
}
