//! Versioned rules table for the progression engine.
//!
//! Every tunable constant lives here, injected through the
//! [`RulesOracle`](crate::env::RulesOracle) so no call site hard-codes its own
//! copy of the leveling curve or class bonuses.

use crate::state::{Difficulty, QuestKind, UserClass};

/// Tunable rule constants consumed by reward math and action transitions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RulesConfig {
    /// Multiplier applied to `max_xp` on each level-up.
    pub xp_growth: f64,
    /// Upper bound on level-up loop iterations per earning application.
    /// Exceeding it is an internal invariant failure, never a silent cap.
    pub level_loop_bound: u32,
    /// Skill points granted per level gained.
    pub skill_points_per_level: u32,

    /// Warrior XP multiplier (gold stays at baseline).
    pub warrior_xp_mult: f64,
    /// Rogue gold multiplier (XP stays at baseline).
    pub rogue_gold_mult: f64,
    /// Wizard multiplier applied to both XP and gold.
    pub wizard_mult: f64,

    /// XP reward at or above which a quest counts as Medium difficulty.
    pub medium_xp_threshold: u64,
    /// XP reward at or above which a quest counts as Hard difficulty.
    pub hard_xp_threshold: u64,

    /// Base gold draw range (inclusive) per non-boss difficulty tier.
    pub easy_gold: (u32, u32),
    pub medium_gold: (u32, u32),
    pub hard_gold: (u32, u32),
    /// Fixed base gold for defeating a boss quest.
    pub boss_kill_gold: u64,

    /// Loot drop probability for boss quests.
    pub boss_drop_chance: f64,
    /// Loot drop probability for normal quests.
    pub normal_drop_chance: f64,

    /// Gold granted at streak multiplier 1.0.
    pub streak_base_gold: u64,
    /// XP granted at streak multiplier 1.0.
    pub streak_base_xp: u64,
    /// Multiplier gained per consecutive login day.
    pub streak_step: f64,
    /// Ceiling on the streak multiplier.
    pub streak_cap: f64,

    /// Gold granted for clearing a raid encounter.
    pub raid_gold: u64,
    /// XP granted for clearing a raid encounter.
    pub raid_xp: u64,

    /// Whether completing a quest past its deadline grants the full reward.
    /// When false, late finishes earn half XP and gold.
    pub late_finish_full_reward: bool,
}

impl RulesConfig {
    // ===== default rule constants =====
    pub const DEFAULT_XP_GROWTH: f64 = 1.2;
    pub const DEFAULT_LEVEL_LOOP_BOUND: u32 = 100;
    pub const DEFAULT_WARRIOR_XP_MULT: f64 = 1.10;
    pub const DEFAULT_ROGUE_GOLD_MULT: f64 = 1.20;
    pub const DEFAULT_WIZARD_MULT: f64 = 1.05;
    pub const DEFAULT_BOSS_DROP_CHANCE: f64 = 0.60;
    pub const DEFAULT_NORMAL_DROP_CHANCE: f64 = 0.15;
    pub const DEFAULT_STREAK_CAP: f64 = 2.5;

    pub fn new() -> Self {
        Self {
            xp_growth: Self::DEFAULT_XP_GROWTH,
            level_loop_bound: Self::DEFAULT_LEVEL_LOOP_BOUND,
            skill_points_per_level: 1,
            warrior_xp_mult: Self::DEFAULT_WARRIOR_XP_MULT,
            rogue_gold_mult: Self::DEFAULT_ROGUE_GOLD_MULT,
            wizard_mult: Self::DEFAULT_WIZARD_MULT,
            medium_xp_threshold: 30,
            hard_xp_threshold: 100,
            easy_gold: (5, 14),
            medium_gold: (10, 19),
            hard_gold: (15, 29),
            boss_kill_gold: 100,
            boss_drop_chance: Self::DEFAULT_BOSS_DROP_CHANCE,
            normal_drop_chance: Self::DEFAULT_NORMAL_DROP_CHANCE,
            streak_base_gold: 50,
            streak_base_xp: 100,
            streak_step: 0.1,
            streak_cap: Self::DEFAULT_STREAK_CAP,
            raid_gold: 5000,
            raid_xp: 10000,
            late_finish_full_reward: true,
        }
    }

    /// Class multipliers as `(xp_mult, gold_mult)` on the 1.0 baseline.
    pub fn class_multipliers(&self, class: UserClass) -> (f64, f64) {
        match class {
            UserClass::Novice => (1.0, 1.0),
            UserClass::Warrior => (self.warrior_xp_mult, 1.0),
            UserClass::Rogue => (1.0, self.rogue_gold_mult),
            UserClass::Wizard => (self.wizard_mult, self.wizard_mult),
        }
    }

    /// Loot drop probability for the given quest kind.
    pub fn drop_chance(&self, kind: QuestKind) -> f64 {
        match kind {
            QuestKind::Boss => self.boss_drop_chance,
            QuestKind::Normal => self.normal_drop_chance,
        }
    }

    /// Difficulty tier for a quest, from its boss flag or XP thresholds.
    pub fn difficulty_for(&self, kind: QuestKind, xp_reward: u64) -> Difficulty {
        if kind == QuestKind::Boss {
            return Difficulty::Boss;
        }
        if xp_reward >= self.hard_xp_threshold {
            Difficulty::Hard
        } else if xp_reward >= self.medium_xp_threshold {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }

    /// Base gold draw range (inclusive) for a non-boss difficulty tier.
    ///
    /// Boss kills use the fixed `boss_kill_gold` constant instead of a draw.
    pub fn base_gold_range(&self, difficulty: Difficulty) -> (u32, u32) {
        match difficulty {
            Difficulty::Easy => self.easy_gold,
            Difficulty::Medium => self.medium_gold,
            Difficulty::Hard => self.hard_gold,
            Difficulty::Boss => {
                let gold = self.boss_kill_gold as u32;
                (gold, gold)
            }
        }
    }

    /// Streak reward multiplier: `min(cap, 1 + streak * step)`.
    pub fn streak_multiplier(&self, streak: u32) -> f64 {
        (1.0 + f64::from(streak) * self.streak_step).min(self.streak_cap)
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_thresholds() {
        let rules = RulesConfig::new();
        assert_eq!(
            rules.difficulty_for(QuestKind::Normal, 20),
            Difficulty::Easy
        );
        assert_eq!(
            rules.difficulty_for(QuestKind::Normal, 30),
            Difficulty::Medium
        );
        assert_eq!(
            rules.difficulty_for(QuestKind::Normal, 100),
            Difficulty::Hard
        );
        // Boss flag wins regardless of XP reward
        assert_eq!(rules.difficulty_for(QuestKind::Boss, 5), Difficulty::Boss);
    }

    #[test]
    fn streak_multiplier_caps_at_two_and_a_half() {
        let rules = RulesConfig::new();
        assert_eq!(rules.streak_multiplier(0), 1.0);
        assert_eq!(rules.streak_multiplier(9), 1.9);
        // 1 + 15 * 0.1 = 2.5 exactly at the cap
        assert_eq!(rules.streak_multiplier(15), 2.5);
        assert_eq!(rules.streak_multiplier(40), 2.5);
    }
}
