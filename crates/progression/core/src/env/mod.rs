//! Traits describing read-only environment facts.
//!
//! Oracles expose the rules table, content definitions (skills,
//! achievements, shop catalog, loot tiers), deterministic randomness, and
//! the clock. The [`Env`] aggregate bundles them so transitions can access
//! everything they need without hard coupling to concrete implementations.

mod achievements;
mod catalog;
mod clock;
mod error;
mod rng;
mod rules;
mod skills;

pub use achievements::{AchievementCondition, AchievementDefinition, AchievementOracle};
pub use catalog::{CatalogOracle, CosmeticKind, LootEntry, ShopItem};
pub use clock::{ClockOracle, FixedClock};
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, compute_seed, roll_context};
pub use rules::RulesOracle;
pub use skills::{SkillDefinition, SkillEffect, SkillOracle};

/// Aggregates read-only oracles required by the action pipeline.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, R, S, A, C, N, K>
where
    R: RulesOracle + ?Sized,
    S: SkillOracle + ?Sized,
    A: AchievementOracle + ?Sized,
    C: CatalogOracle + ?Sized,
    N: RngOracle + ?Sized,
    K: ClockOracle + ?Sized,
{
    rules: Option<&'a R>,
    skills: Option<&'a S>,
    achievements: Option<&'a A>,
    catalog: Option<&'a C>,
    rng: Option<&'a N>,
    clock: Option<&'a K>,
}

/// Trait-object form of [`Env`] consumed by the engine and transitions.
pub type GameEnv<'a> = Env<
    'a,
    dyn RulesOracle + 'a,
    dyn SkillOracle + 'a,
    dyn AchievementOracle + 'a,
    dyn CatalogOracle + 'a,
    dyn RngOracle + 'a,
    dyn ClockOracle + 'a,
>;

impl<'a, R, S, A, C, N, K> Env<'a, R, S, A, C, N, K>
where
    R: RulesOracle + ?Sized,
    S: SkillOracle + ?Sized,
    A: AchievementOracle + ?Sized,
    C: CatalogOracle + ?Sized,
    N: RngOracle + ?Sized,
    K: ClockOracle + ?Sized,
{
    pub fn new(
        rules: Option<&'a R>,
        skills: Option<&'a S>,
        achievements: Option<&'a A>,
        catalog: Option<&'a C>,
        rng: Option<&'a N>,
        clock: Option<&'a K>,
    ) -> Self {
        Self {
            rules,
            skills,
            achievements,
            catalog,
            rng,
            clock,
        }
    }

    pub fn with_all(
        rules: &'a R,
        skills: &'a S,
        achievements: &'a A,
        catalog: &'a C,
        rng: &'a N,
        clock: &'a K,
    ) -> Self {
        Self::new(
            Some(rules),
            Some(skills),
            Some(achievements),
            Some(catalog),
            Some(rng),
            Some(clock),
        )
    }

    pub fn empty() -> Self {
        Self {
            rules: None,
            skills: None,
            achievements: None,
            catalog: None,
            rng: None,
            clock: None,
        }
    }

    /// Returns the RulesOracle, or an error if not available.
    pub fn rules(&self) -> Result<&'a R, OracleError> {
        self.rules.ok_or(OracleError::RulesNotAvailable)
    }

    /// Returns the SkillOracle, or an error if not available.
    pub fn skills(&self) -> Result<&'a S, OracleError> {
        self.skills.ok_or(OracleError::SkillsNotAvailable)
    }

    /// Returns the AchievementOracle, or an error if not available.
    pub fn achievements(&self) -> Result<&'a A, OracleError> {
        self.achievements.ok_or(OracleError::AchievementsNotAvailable)
    }

    /// Returns the CatalogOracle, or an error if not available.
    pub fn catalog(&self) -> Result<&'a C, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a N, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Returns the ClockOracle, or an error if not available.
    pub fn clock(&self) -> Result<&'a K, OracleError> {
        self.clock.ok_or(OracleError::ClockNotAvailable)
    }
}

impl<'a, R, S, A, C, N, K> Env<'a, R, S, A, C, N, K>
where
    R: RulesOracle + 'a,
    S: SkillOracle + 'a,
    A: AchievementOracle + 'a,
    C: CatalogOracle + 'a,
    N: RngOracle + 'a,
    K: ClockOracle + 'a,
{
    /// Converts this environment into the trait-object based [`GameEnv`].
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let rules: Option<&'a dyn RulesOracle> = self.rules.map(|rules| rules as _);
        let skills: Option<&'a dyn SkillOracle> = self.skills.map(|skills| skills as _);
        let achievements: Option<&'a dyn AchievementOracle> =
            self.achievements.map(|achievements| achievements as _);
        let catalog: Option<&'a dyn CatalogOracle> = self.catalog.map(|catalog| catalog as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        let clock: Option<&'a dyn ClockOracle> = self.clock.map(|clock| clock as _);
        Env::new(rules, skills, achievements, catalog, rng, clock)
    }
}
