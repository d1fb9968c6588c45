//! Effective reward multiplier resolution.
//!
//! Combines the class table, unlocked skill bonuses, and the critical roll
//! into the XP/gold factors for a single reward. Purely computed; the
//! critical double applies to this reward only and is never persisted.

use crate::env::{GameEnv, OracleError, SkillEffect};
use crate::state::Profile;

/// Effective multipliers for one reward application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardMultipliers {
    pub xp_mult: f64,
    pub gold_mult: f64,
    pub is_critical: bool,
}

impl RewardMultipliers {
    /// Baseline multipliers with no class, skills, or critical roll.
    pub const NEUTRAL: Self = Self {
        xp_mult: 1.0,
        gold_mult: 1.0,
        is_critical: false,
    };
}

/// Resolves the multipliers for the given profile.
///
/// Class bonuses are mutually exclusive; skill bonuses stack additively on
/// top. When a skill grants a critical chance, a d100 roll on `crit_seed`
/// decides whether both factors double for this reward.
pub fn resolve_multipliers(
    profile: &Profile,
    env: &GameEnv<'_>,
    crit_seed: u64,
) -> Result<RewardMultipliers, OracleError> {
    let rules = env.rules()?.rules();
    let (mut xp_mult, mut gold_mult) = rules.class_multipliers(profile.user_class);

    let skills = env.skills()?;
    let mut crit_chance = 0.0f64;
    for id in &profile.unlocked_skills {
        let Some(definition) = skills.definition(id) else {
            continue;
        };
        match definition.effect {
            SkillEffect::XpBonus(bonus) => xp_mult += bonus,
            SkillEffect::GoldBonus(bonus) => gold_mult += bonus,
            SkillEffect::CriticalChance(chance) => crit_chance = crit_chance.max(chance),
            SkillEffect::ShopDiscount(_) | SkillEffect::FocusBonusXp(_) => {}
        }
    }

    let mut is_critical = false;
    if crit_chance > 0.0 {
        let roll = env.rng()?.roll_d100(crit_seed);
        if f64::from(roll) <= crit_chance * 100.0 {
            xp_mult *= 2.0;
            gold_mult *= 2.0;
            is_critical = true;
        }
    }

    Ok(RewardMultipliers {
        xp_mult,
        gold_mult,
        is_critical,
    })
}

/// Total shop discount fraction from unlocked skills, capped at 1.0.
pub fn resolve_shop_discount(profile: &Profile, env: &GameEnv<'_>) -> Result<f64, OracleError> {
    let skills = env.skills()?;
    let mut discount = 0.0f64;
    for id in &profile.unlocked_skills {
        if let Some(definition) = skills.definition(id)
            && let SkillEffect::ShopDiscount(fraction) = definition.effect
        {
            discount += fraction;
        }
    }
    Ok(discount.min(1.0))
}

/// Flat focus-session XP bonus from unlocked skills.
pub fn resolve_focus_bonus(profile: &Profile, env: &GameEnv<'_>) -> Result<u64, OracleError> {
    let skills = env.skills()?;
    let mut bonus = 0u64;
    for id in &profile.unlocked_skills {
        if let Some(definition) = skills.definition(id)
            && let SkillEffect::FocusBonusXp(xp) = definition.effect
        {
            bonus += xp;
        }
    }
    Ok(bonus)
}
