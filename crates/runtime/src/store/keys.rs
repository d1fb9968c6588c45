//! Storage keys shared by every store implementation.

/// The player profile (level, xp, gold, skills, achievements, history).
pub const PROFILE: &str = "profile";
/// The quest list.
pub const QUESTS: &str = "quests";
/// The loot inventory.
pub const INVENTORY: &str = "inventory";
/// The singleton raid encounter, when one exists.
pub const ACTIVE_RAID: &str = "activeRaid";
/// Ids of purchased shop items.
pub const PURCHASED_ITEMS: &str = "purchasedItems";
/// Engine bookkeeping (RNG seed and action nonce).
pub const ENGINE_META: &str = "engineMeta";

/// Legacy per-field key folded into the profile on read.
pub const DAILY_STREAK: &str = "dailyStreak";
/// Legacy per-field key folded into the profile on read.
pub const LAST_LOGIN_DATE: &str = "lastLoginDate";

/// Every key the session reads at startup.
pub const ALL: &[&str] = &[
    PROFILE,
    QUESTS,
    INVENTORY,
    ACTIVE_RAID,
    PURCHASED_ITEMS,
    ENGINE_META,
    DAILY_STREAK,
    LAST_LOGIN_DATE,
];
