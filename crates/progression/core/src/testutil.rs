//! Shared fixtures for unit tests: a small content pack and a pre-wired
//! environment.

use chrono::NaiveDate;

use crate::config::RulesConfig;
use crate::env::{
    AchievementCondition, AchievementDefinition, AchievementOracle, CatalogOracle, CosmeticKind,
    Env, FixedClock, GameEnv, LootEntry, PcgRng, ShopItem, SkillDefinition, SkillEffect,
    SkillOracle,
};
use crate::state::{ItemId, LootKind, SkillId, StatCounter};

pub(crate) struct TestContent {
    skills: Vec<SkillDefinition>,
    achievements: Vec<AchievementDefinition>,
    shop: Vec<ShopItem>,
    loot: Vec<LootEntry>,
}

impl TestContent {
    pub(crate) fn new() -> Self {
        Self {
            skills: vec![
                SkillDefinition::new(
                    "fast_learner",
                    "Fast Learner",
                    "+5% XP from quests",
                    1,
                    None,
                    SkillEffect::XpBonus(0.05),
                ),
                SkillDefinition::new(
                    "novice_looter",
                    "Novice Looter",
                    "+5% gold from quests",
                    1,
                    None,
                    SkillEffect::GoldBonus(0.05),
                ),
                SkillDefinition::new(
                    "critical_mind",
                    "Critical Mind",
                    "10% chance for double rewards",
                    3,
                    Some(SkillId::new("fast_learner")),
                    SkillEffect::CriticalChance(0.10),
                ),
                SkillDefinition::new(
                    "goblin_negotiator",
                    "Goblin Negotiator",
                    "10% discount in the shop",
                    2,
                    Some(SkillId::new("novice_looter")),
                    SkillEffect::ShopDiscount(0.10),
                ),
                SkillDefinition::new(
                    "deep_work",
                    "Deep Work",
                    "+25 XP from focus sessions",
                    2,
                    Some(SkillId::new("fast_learner")),
                    SkillEffect::FocusBonusXp(25),
                ),
            ],
            achievements: vec![
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
                    "dungeon_master",
                    "Dungeon Master",
                    "Defeat 5 bosses",
                    AchievementCondition::CounterAtLeast {
                        counter: StatCounter::BossesDefeated,
                        threshold: 5,
                    },
                ),
                AchievementDefinition::new(
                    "legendary_hero",
                    "Legendary Hero",
                    "Reach level 10",
                    AchievementCondition::LevelAtLeast(10),
                ),
            ],
            shop: vec![
                ShopItem::new("theme_cyber", "Cyberpunk Neon", CosmeticKind::Theme, 100),
                ShopItem::new("av_wizard", "Wizard", CosmeticKind::Avatar, 0),
            ],
            loot: vec![
                LootEntry::new("potion", "Health Potion", LootKind::Potion, "Common.", 60),
                LootEntry::new("scroll", "Mystic Scroll", LootKind::Scroll, "Uncommon.", 30),
                LootEntry::new("key", "Golden Key", LootKind::Key, "Rare.", 10),
            ],
        }
    }
}

impl SkillOracle for TestContent {
    fn definition(&self, id: &SkillId) -> Option<&SkillDefinition> {
        self.skills.iter().find(|definition| &definition.id == id)
    }

    fn all_definitions(&self) -> &[SkillDefinition] {
        &self.skills
    }
}

impl AchievementOracle for TestContent {
    fn all_definitions(&self) -> &[AchievementDefinition] {
        &self.achievements
    }
}

impl CatalogOracle for TestContent {
    fn shop_item(&self, id: &ItemId) -> Option<&ShopItem> {
        self.shop.iter().find(|item| &item.id == id)
    }

    fn loot_table(&self) -> &[LootEntry] {
        &self.loot
    }
}

/// A fully wired environment pinned to a fixed date.
pub(crate) struct TestEnv {
    pub(crate) rules: RulesConfig,
    pub(crate) content: TestContent,
    pub(crate) rng: PcgRng,
    pub(crate) clock: FixedClock,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self::on(NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date"))
    }

    pub(crate) fn on(date: NaiveDate) -> Self {
        Self {
            rules: RulesConfig::new(),
            content: TestContent::new(),
            rng: PcgRng,
            clock: FixedClock::at_midnight(date),
        }
    }

    pub(crate) fn game_env(&self) -> GameEnv<'_> {
        Env::with_all(
            &self.rules,
            &self.content,
            &self.content,
            &self.content,
            &self.rng,
            &self.clock,
        )
        .as_game_env()
    }
}
