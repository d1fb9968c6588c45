//! Built-in content tables.
//!
//! These are the defaults shipped with the application; a deployment can
//! replace any table by loading a [`ContentPack`](crate::ContentPack) from
//! JSON instead.

use progression_core::{
    AchievementCondition, AchievementDefinition, CosmeticKind, LootEntry, LootKind, ShopItem,
    SkillDefinition, SkillEffect, SkillId, StatCounter,
};

/// The default skill tree.
///
/// Two roots (learning and looting) with one or two descendants each; the
/// tree never grants anything outside [`SkillEffect`].
pub fn builtin_skills() -> Vec<SkillDefinition> {
    vec![
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
            "10% chance for DOUBLE rewards",
            3,
            Some(SkillId::new("fast_learner")),
            SkillEffect::CriticalChance(0.10),
        ),
        SkillDefinition::new(
            "deep_work",
            "Deep Work",
            "+25 XP from focus sessions",
            2,
            Some(SkillId::new("fast_learner")),
            SkillEffect::FocusBonusXp(25),
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
            "midas_touch",
            "Midas Touch",
            "+15% gold (stacks)",
            3,
            Some(SkillId::new("goblin_negotiator")),
            SkillEffect::GoldBonus(0.15),
        ),
    ]
}

/// The default achievement list.
pub fn builtin_achievements() -> Vec<AchievementDefinition> {
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
            "dungeon_master",
            "Dungeon Master",
            "Defeat 5 bosses",
            AchievementCondition::CounterAtLeast {
                counter: StatCounter::BossesDefeated,
                threshold: 5,
            },
        ),
        AchievementDefinition::new(
            "millionaire",
            "Millionaire",
            "Earn 1000 gold total",
            AchievementCondition::CounterAtLeast {
                counter: StatCounter::TotalGoldEarned,
                threshold: 1000,
            },
        ),
        AchievementDefinition::new(
            "scholar",
            "Scholar",
            "Write 20 notes",
            AchievementCondition::CounterAtLeast {
                counter: StatCounter::NotesCreated,
                threshold: 20,
            },
        ),
        AchievementDefinition::new(
            "shopaholic",
            "Shopaholic",
            "Buy 5 items",
            AchievementCondition::CounterAtLeast {
                counter: StatCounter::ItemsBought,
                threshold: 5,
            },
        ),
        AchievementDefinition::new(
            "time_lord",
            "Time Lord",
            "Restore 50 tabs",
            AchievementCondition::CounterAtLeast {
                counter: StatCounter::TabsRestored,
                threshold: 50,
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

/// The default shop catalog. Price-0 entries are starter items.
pub fn builtin_shop_catalog() -> Vec<ShopItem> {
    vec![
        ShopItem::new("theme_default", "Standard Gear", CosmeticKind::Theme, 0),
        ShopItem::new("theme_cyber", "Cyberpunk Neon", CosmeticKind::Theme, 100),
        ShopItem::new("theme_forest", "Elven Forest", CosmeticKind::Theme, 150),
        ShopItem::new("theme_royal", "Royal Guard", CosmeticKind::Theme, 300),
        ShopItem::new("av_wizard", "Wizard", CosmeticKind::Avatar, 0),
        ShopItem::new("av_elf", "Elf", CosmeticKind::Avatar, 50),
        ShopItem::new("av_robot", "Droid", CosmeticKind::Avatar, 80),
        ShopItem::new("av_skeleton", "Undead", CosmeticKind::Avatar, 120),
        ShopItem::new("cf_default", "Paper Scraps", CosmeticKind::Confetti, 0),
        ShopItem::new("cf_fire", "Fireball", CosmeticKind::Confetti, 200),
        ShopItem::new("cf_ice", "Ice Shards", CosmeticKind::Confetti, 200),
    ]
}

/// The default loot table: three tiers, rare at 10% conditional weight.
pub fn builtin_loot_table() -> Vec<LootEntry> {
    vec![
        LootEntry::new(
            "potion",
            "Health Potion",
            LootKind::Potion,
            "A small vial of liquid motivation.",
            60,
        ),
        LootEntry::new(
            "scroll",
            "Mystic Scroll",
            LootKind::Scroll,
            "Notes from an adventurer who came before.",
            30,
        ),
        LootEntry::new(
            "key",
            "Golden Key",
            LootKind::Key,
            "Opens a door you haven't found yet.",
            10,
        ),
    ]
}
