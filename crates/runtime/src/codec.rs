//! Translation between engine state and the key/value store shape.
//!
//! Each top-level record persists under its own key as a JSON value. Legacy
//! installs stored the streak and last-login date as standalone keys; those
//! are folded into the profile on read and never written back separately.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use progression_core::{Action, EngineState, Profile, Quest, RaidEncounter};

use crate::error::Result;
use crate::store::{KeyValueStore, StoreMap, keys};

/// Engine bookkeeping persisted alongside the records.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub(crate) struct EngineMeta {
    pub seed: u64,
    pub nonce: u64,
}

/// Reads the full engine state from the store, folding legacy keys.
///
/// Missing keys fall back to defaults, so a brand-new install yields a
/// fresh level-1 profile. `fallback_seed` is used when no engine metadata
/// has been persisted yet.
pub(crate) fn load_state(store: &dyn KeyValueStore, fallback_seed: u64) -> Result<EngineState> {
    let found = store.get(keys::ALL)?;

    let mut profile: Profile = decode_or_default(&found, keys::PROFILE)?;
    fold_legacy(&mut profile, &found);

    let meta: EngineMeta = match found.get(keys::ENGINE_META) {
        Some(value) => serde_json::from_value(value.clone())?,
        None => EngineMeta {
            seed: fallback_seed,
            nonce: 0,
        },
    };

    // Older installs applied fixed per-subtask damage instead of the ratio
    // formula; re-derive HP so loaded records satisfy the engine invariant.
    let mut quests: Vec<Quest> = decode_or_default(&found, keys::QUESTS)?;
    for quest in &mut quests {
        quest.recompute_hp();
    }
    let mut active_raid: Option<RaidEncounter> = decode_or_default(&found, keys::ACTIVE_RAID)?;
    if let Some(raid) = active_raid.as_mut() {
        raid.recompute_hp();
    }

    Ok(EngineState {
        seed: meta.seed,
        nonce: meta.nonce,
        profile,
        quests,
        inventory: decode_or_default(&found, keys::INVENTORY)?,
        active_raid,
        purchased_items: decode_or_default(&found, keys::PURCHASED_ITEMS)?,
    })
}

fn decode_or_default<T>(found: &StoreMap, key: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    match found.get(key) {
        Some(serde_json::Value::Null) | None => Ok(T::default()),
        Some(value) => Ok(serde_json::from_value(value.clone())?),
    }
}

/// Folds the legacy standalone streak keys into the profile. Values
/// already present in the profile win.
fn fold_legacy(profile: &mut Profile, found: &StoreMap) {
    if profile.streak == 0
        && let Some(streak) = found.get(keys::DAILY_STREAK).and_then(|value| value.as_u64())
    {
        profile.streak = streak as u32;
    }
    if profile.last_login.is_none()
        && let Some(text) = found.get(keys::LAST_LOGIN_DATE).and_then(|value| value.as_str())
    {
        profile.last_login = parse_legacy_date(text);
    }
}

/// Parses a stored date: ISO first, then the JS `toDateString` format
/// older installs wrote (e.g. `Mon Apr 01 2024`).
fn parse_legacy_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%a %b %d %Y"))
        .ok()
}

/// Serializes the store entries an action's outcome needs to persist.
///
/// The profile and engine metadata change on every action; record keys are
/// included only when the action can touch them.
pub(crate) fn entries_for(state: &EngineState, action: &Action) -> Result<StoreMap> {
    let mut entries = StoreMap::new();
    entries.insert(
        keys::PROFILE.to_owned(),
        serde_json::to_value(&state.profile)?,
    );
    entries.insert(
        keys::ENGINE_META.to_owned(),
        serde_json::to_value(EngineMeta {
            seed: state.seed,
            nonce: state.nonce,
        })?,
    );

    match action {
        Action::AddQuest(_)
        | Action::AddSubtask(_)
        | Action::DeleteQuest(_)
        | Action::CompleteQuest(_)
        | Action::DamageSubtask(_) => {
            entries.insert(keys::QUESTS.to_owned(), serde_json::to_value(&state.quests)?);
            entries.insert(
                keys::INVENTORY.to_owned(),
                serde_json::to_value(&state.inventory)?,
            );
        }
        Action::PurchaseItem(_) => {
            entries.insert(
                keys::PURCHASED_ITEMS.to_owned(),
                serde_json::to_value(&state.purchased_items)?,
            );
        }
        Action::StartRaid(_)
        | Action::AddRaidTask(_)
        | Action::DamageRaidTask(_)
        | Action::AbandonRaid(_) => {
            entries.insert(
                keys::ACTIVE_RAID.to_owned(),
                serde_json::to_value(&state.active_raid)?,
            );
        }
        Action::DailyLogin(_)
        | Action::UnlockSkill(_)
        | Action::SelectClass(_)
        | Action::RecordActivity(_)
        | Action::CompleteFocusSession(_) => {}
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[test]
    fn empty_store_yields_a_fresh_state() {
        let store = MemoryStore::new();
        let state = load_state(&store, 99).unwrap();
        assert_eq!(state.profile.level, 1);
        assert_eq!(state.seed, 99);
        assert_eq!(state.nonce, 0);
        assert!(state.quests.is_empty());
    }

    #[test]
    fn legacy_streak_keys_fold_into_the_profile() {
        let mut entries = StoreMap::new();
        entries.insert(
            keys::PROFILE.to_owned(),
            json!({"level": 3, "xp": 10, "maxXp": 144, "gold": 80}),
        );
        entries.insert(keys::DAILY_STREAK.to_owned(), json!(6));
        entries.insert(keys::LAST_LOGIN_DATE.to_owned(), json!("Mon Apr 01 2024"));
        let store = MemoryStore::with_entries(entries);

        let state = load_state(&store, 0).unwrap();
        assert_eq!(state.profile.level, 3);
        assert_eq!(state.profile.streak, 6);
        assert_eq!(
            state.profile.last_login,
            NaiveDate::from_ymd_opt(2024, 4, 1)
        );
    }

    #[test]
    fn profile_values_win_over_legacy_keys() {
        let mut entries = StoreMap::new();
        entries.insert(
            keys::PROFILE.to_owned(),
            json!({
                "level": 2,
                "xp": 0,
                "maxXp": 120,
                "gold": 0,
                "streak": 9,
                "lastLoginDate": "2024-04-02"
            }),
        );
        entries.insert(keys::DAILY_STREAK.to_owned(), json!(1));
        entries.insert(keys::LAST_LOGIN_DATE.to_owned(), json!("Sat Mar 02 2024"));
        let store = MemoryStore::with_entries(entries);

        let state = load_state(&store, 0).unwrap();
        assert_eq!(state.profile.streak, 9);
        assert_eq!(
            state.profile.last_login,
            NaiveDate::from_ymd_opt(2024, 4, 2)
        );
    }

    #[test]
    fn loaded_boss_hp_is_rederived_from_subtasks() {
        // A record written by the fixed-damage revision: hp 60 despite one
        // of two subtasks being done
        let mut entries = StoreMap::new();
        entries.insert(
            keys::QUESTS.to_owned(),
            json!([{
                "id": 1,
                "title": "Deadline Demon",
                "type": "boss",
                "xpReward": 500,
                "hp": 60,
                "maxHp": 100,
                "subtasks": [
                    {"id": 1, "title": "plan", "completed": true},
                    {"id": 2, "title": "ship", "completed": false}
                ]
            }]),
        );
        let store = MemoryStore::with_entries(entries);

        let state = load_state(&store, 0).unwrap();
        assert_eq!(state.quests[0].hp, 50);
    }

    #[test]
    fn legacy_js_date_format_parses() {
        assert_eq!(
            parse_legacy_date("Sun Dec 31 2023"),
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
        assert_eq!(
            parse_legacy_date("2023-12-31"),
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
        assert_eq!(parse_legacy_date("tomorrow"), None);
    }
}
