//! Achievement evaluation: a pure predicate sweep over cumulative stats.

use std::collections::BTreeSet;

use crate::env::AchievementDefinition;
use crate::state::{AchievementId, StatCounters};

/// Returns the achievements whose condition is newly true over the given
/// stats snapshot, skipping any already unlocked.
///
/// Conditions reference only monotonic counters and the level, so this runs
/// after every stats or level change without risk of revoking anything.
/// The caller merges the result into the profile and emits one event per id.
pub fn evaluate(
    stats: &StatCounters,
    level: u32,
    already_unlocked: &BTreeSet<AchievementId>,
    definitions: &[AchievementDefinition],
) -> Vec<AchievementId> {
    definitions
        .iter()
        .filter(|definition| !already_unlocked.contains(&definition.id))
        .filter(|definition| definition.condition.is_met(stats, level))
        .map(|definition| definition.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::AchievementCondition;
    use crate::state::StatCounter;

    fn definitions() -> Vec<AchievementDefinition> {
        vec![
            AchievementDefinition::new(
                "novice_slayer",
                "Novice Slayer",
                "Complete 10 quests",
                AchievementCondition::CounterAtLeast {
                    counter: StatCounter::QuestsCompleted,
                    threshold: 10,
                },
            ),
            AchievementDefinition::new(
                "legendary_hero",
                "Legendary Hero",
                "Reach level 10",
                AchievementCondition::LevelAtLeast(10),
            ),
        ]
    }

    #[test]
    fn newly_met_conditions_unlock_once() {
        let definitions = definitions();
        let mut stats = StatCounters::default();
        stats.quests_completed = 10;

        let unlocked = evaluate(&stats, 1, &BTreeSet::new(), &definitions);
        assert_eq!(unlocked, vec![AchievementId::new("novice_slayer")]);

        // Already unlocked: the sweep returns nothing new
        let already: BTreeSet<_> = unlocked.into_iter().collect();
        assert!(evaluate(&stats, 1, &already, &definitions).is_empty());
    }

    #[test]
    fn level_condition_is_independent_of_counters() {
        let definitions = definitions();
        let stats = StatCounters::default();
        let unlocked = evaluate(&stats, 10, &BTreeSet::new(), &definitions);
        assert_eq!(unlocked, vec![AchievementId::new("legendary_hero")]);
    }

    #[test]
    fn unmet_conditions_stay_locked() {
        let definitions = definitions();
        let mut stats = StatCounters::default();
        stats.quests_completed = 9;
        assert!(evaluate(&stats, 9, &BTreeSet::new(), &definitions).is_empty());
    }
}
