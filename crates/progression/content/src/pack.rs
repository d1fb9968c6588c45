//! A complete content pack implementing the core's content oracles.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use progression_core::{
    AchievementDefinition, AchievementOracle, CatalogOracle, ItemId, LootEntry, ShopItem,
    SkillDefinition, SkillId, SkillOracle,
};

use crate::builtin;

/// Errors raised while loading or validating a content pack.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse content JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("skill '{skill}' references unknown prerequisite '{prerequisite}'")]
    UnknownPrerequisite { skill: SkillId, prerequisite: SkillId },

    #[error("duplicate definition id '{0}'")]
    DuplicateId(String),
}

/// All static content the engine consults, bundled behind the oracle
/// traits. The default pack carries the built-in tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentPack {
    pub skills: Vec<SkillDefinition>,
    pub achievements: Vec<AchievementDefinition>,
    pub shop: Vec<ShopItem>,
    pub loot: Vec<LootEntry>,
}

impl ContentPack {
    /// The built-in content shipped with the application.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Parses a pack from JSON and validates cross-references.
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let pack: Self = serde_json::from_str(json)?;
        pack.validate()?;
        Ok(pack)
    }

    /// Loads a pack from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Checks id uniqueness and that every skill prerequisite exists.
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut seen = std::collections::BTreeSet::new();
        for skill in &self.skills {
            if !seen.insert(skill.id.as_str().to_owned()) {
                return Err(ContentError::DuplicateId(skill.id.as_str().to_owned()));
            }
            if let Some(prerequisite) = &skill.prerequisite
                && !self.skills.iter().any(|other| &other.id == prerequisite)
            {
                return Err(ContentError::UnknownPrerequisite {
                    skill: skill.id.clone(),
                    prerequisite: prerequisite.clone(),
                });
            }
        }
        let mut seen = std::collections::BTreeSet::new();
        for achievement in &self.achievements {
            if !seen.insert(achievement.id.as_str().to_owned()) {
                return Err(ContentError::DuplicateId(
                    achievement.id.as_str().to_owned(),
                ));
            }
        }
        let mut seen = std::collections::BTreeSet::new();
        for item in &self.shop {
            if !seen.insert(item.id.as_str().to_owned()) {
                return Err(ContentError::DuplicateId(item.id.as_str().to_owned()));
            }
        }
        Ok(())
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        Self {
            skills: builtin::builtin_skills(),
            achievements: builtin::builtin_achievements(),
            shop: builtin::builtin_shop_catalog(),
            loot: builtin::builtin_loot_table(),
        }
    }
}

impl SkillOracle for ContentPack {
    fn definition(&self, id: &SkillId) -> Option<&SkillDefinition> {
        self.skills.iter().find(|definition| &definition.id == id)
    }

    fn all_definitions(&self) -> &[SkillDefinition] {
        &self.skills
    }
}

impl AchievementOracle for ContentPack {
    fn all_definitions(&self) -> &[AchievementDefinition] {
        &self.achievements
    }
}

impl CatalogOracle for ContentPack {
    fn shop_item(&self, id: &ItemId) -> Option<&ShopItem> {
        self.shop.iter().find(|item| &item.id == id)
    }

    fn loot_table(&self) -> &[LootEntry] {
        &self.loot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_pack_validates() {
        ContentPack::builtin().validate().unwrap();
    }

    #[test]
    fn builtin_tree_prerequisites_resolve() {
        let pack = ContentPack::builtin();
        let midas = pack.definition(&SkillId::new("midas_touch")).unwrap();
        assert_eq!(
            midas.prerequisite,
            Some(SkillId::new("goblin_negotiator"))
        );
        // Every prerequisite resolves to a definition in the same pack
        for skill in &pack.skills {
            if let Some(prerequisite) = &skill.prerequisite {
                assert!(pack.definition(prerequisite).is_some());
            }
        }
    }

    #[test]
    fn pack_round_trips_through_json() {
        let pack = ContentPack::builtin();
        let json = serde_json::to_string(&pack).unwrap();
        let parsed = ContentPack::from_json_str(&json).unwrap();
        assert_eq!(parsed, pack);
    }

    #[test]
    fn unknown_prerequisite_is_rejected() {
        let mut pack = ContentPack::builtin();
        pack.skills[2].prerequisite = Some(SkillId::new("not_a_skill"));
        assert!(matches!(
            pack.validate(),
            Err(ContentError::UnknownPrerequisite { .. })
        ));
    }
}
