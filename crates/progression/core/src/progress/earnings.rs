//! Stat/currency arithmetic: XP, gold, and the level-up carry-over loop.

use crate::config::RulesConfig;
use crate::error::{EngineError, ErrorSeverity};
use crate::state::Profile;

/// Result of applying earned XP and gold to a profile.
#[derive(Clone, Debug, PartialEq)]
pub struct EarningsOutcome {
    pub profile: Profile,
    pub leveled_up: bool,
    /// Level after the update (equal to the input level when no level-up
    /// occurred). Large rewards can gain several levels in one application.
    pub new_level: u32,
}

/// Internal failures of the earning arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressError {
    /// The level-up loop exceeded its iteration bound. This means the XP
    /// curve stopped growing (a rules-table bug) and must never be clamped.
    #[error("level-up loop exceeded {bound} iterations at level {level}")]
    LevelLoopDiverged { bound: u32, level: u32 },
}

impl EngineError for ProgressError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LevelLoopDiverged { .. } => "level_loop_diverged",
        }
    }
}

/// Applies earned XP and gold, running the level-up loop until the
/// `xp < max_xp` invariant is restored.
///
/// Returns a new profile and never mutates the input. Each level gained
/// grants skill points and grows `max_xp` by the configured factor. Earned
/// gold also feeds the monotonic `total_gold_earned` counter.
pub fn apply_earnings(
    profile: &Profile,
    earned_xp: u64,
    earned_gold: u64,
    rules: &RulesConfig,
) -> Result<EarningsOutcome, ProgressError> {
    let mut next = profile.clone();
    next.gold += earned_gold;
    next.stats.total_gold_earned += earned_gold;
    next.xp += earned_xp;

    let mut levels_gained = 0u32;
    while next.xp >= next.max_xp {
        levels_gained += 1;
        if levels_gained > rules.level_loop_bound {
            return Err(ProgressError::LevelLoopDiverged {
                bound: rules.level_loop_bound,
                level: next.level,
            });
        }
        next.xp -= next.max_xp;
        next.level += 1;
        next.skill_points += rules.skill_points_per_level;
        next.max_xp = (next.max_xp as f64 * rules.xp_growth).floor() as u64;
    }

    Ok(EarningsOutcome {
        leveled_up: levels_gained > 0,
        new_level: next.level,
        profile: next,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carry_over_level_up() {
        // Level 1 at 90/100 xp earning 20 XP with no multipliers
        let mut profile = Profile::new();
        profile.xp = 90;

        let outcome = apply_earnings(&profile, 20, 0, &RulesConfig::new()).unwrap();
        assert!(outcome.leveled_up);
        assert_eq!(outcome.new_level, 2);
        assert_eq!(outcome.profile.level, 2);
        assert_eq!(outcome.profile.xp, 10);
        // floor(100 * 1.2) = 120
        assert_eq!(outcome.profile.max_xp, 120);
        assert_eq!(outcome.profile.skill_points, 1);
        // Input untouched
        assert_eq!(profile.level, 1);
    }

    #[test]
    fn massive_reward_gains_multiple_levels() {
        let profile = Profile::new();
        let outcome = apply_earnings(&profile, 10_000, 5_000, &RulesConfig::new()).unwrap();

        assert!(outcome.leveled_up);
        assert!(outcome.new_level > 2);
        assert!(outcome.profile.xp < outcome.profile.max_xp);
        assert_eq!(
            outcome.profile.skill_points,
            outcome.profile.level - profile.level
        );
        assert_eq!(outcome.profile.gold, 5_000);
        assert_eq!(outcome.profile.stats.total_gold_earned, 5_000);
    }

    #[test]
    fn no_level_up_keeps_level_and_points() {
        let profile = Profile::new();
        let outcome = apply_earnings(&profile, 40, 7, &RulesConfig::new()).unwrap();
        assert!(!outcome.leveled_up);
        assert_eq!(outcome.new_level, 1);
        assert_eq!(outcome.profile.xp, 40);
        assert_eq!(outcome.profile.skill_points, 0);
    }

    #[test]
    fn stalled_curve_diverges_instead_of_clamping() {
        // A growth factor of 1.0 on a tiny max_xp never absorbs a large
        // reward within the bound; that must surface as an error.
        let mut rules = RulesConfig::new();
        rules.xp_growth = 1.0;
        let mut profile = Profile::new();
        profile.max_xp = 1;

        let result = apply_earnings(&profile, 1_000, 0, &rules);
        assert_eq!(
            result,
            Err(ProgressError::LevelLoopDiverged {
                bound: rules.level_loop_bound,
                level: profile.level + rules.level_loop_bound,
            })
        );
    }
}
