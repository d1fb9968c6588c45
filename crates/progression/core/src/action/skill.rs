//! Skill tree unlocks: prerequisite-gated point spending.

use super::ActionTransition;
use crate::env::{GameEnv, OracleError};
use crate::error::{EngineError, ErrorSeverity};
use crate::event::Event;
use crate::state::{EngineState, SkillId};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SkillError {
    #[error("unknown skill '{0}'")]
    UnknownSkill(SkillId),

    #[error("skill '{0}' is already unlocked")]
    AlreadyUnlocked(SkillId),

    #[error("skill '{skill}' requires '{prerequisite}' first")]
    PrerequisiteMissing {
        skill: SkillId,
        prerequisite: SkillId,
    },

    #[error("skill costs {required} points but only {available} are available")]
    InsufficientPoints { required: u32, available: u32 },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl EngineError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownSkill(_) => ErrorSeverity::Validation,
            Self::AlreadyUnlocked(_)
            | Self::PrerequisiteMissing { .. }
            | Self::InsufficientPoints { .. } => ErrorSeverity::Recoverable,
            Self::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSkill(_) => "unknown_skill",
            Self::AlreadyUnlocked(_) => "skill_already_unlocked",
            Self::PrerequisiteMissing { .. } => "prerequisite_missing",
            Self::InsufficientPoints { .. } => "insufficient_points",
            Self::Oracle(inner) => inner.error_code(),
        }
    }
}

/// Spends skill points to unlock a node in the skill tree.
///
/// Unlocking an already-owned skill is an explicit rejection, not a silent
/// success, and no operation ever removes or refunds a skill.
#[derive(Clone, Debug, PartialEq)]
pub struct UnlockSkillAction {
    pub skill: SkillId,
}

impl ActionTransition for UnlockSkillAction {
    type Error = SkillError;

    fn pre_validate(&self, state: &EngineState, env: &GameEnv<'_>) -> Result<(), SkillError> {
        let definition = env
            .skills()?
            .definition(&self.skill)
            .ok_or_else(|| SkillError::UnknownSkill(self.skill.clone()))?;

        if state.profile.unlocked_skills.contains(&self.skill) {
            return Err(SkillError::AlreadyUnlocked(self.skill.clone()));
        }
        if let Some(prerequisite) = &definition.prerequisite
            && !state.profile.unlocked_skills.contains(prerequisite)
        {
            return Err(SkillError::PrerequisiteMissing {
                skill: self.skill.clone(),
                prerequisite: prerequisite.clone(),
            });
        }
        if state.profile.skill_points < definition.cost {
            return Err(SkillError::InsufficientPoints {
                required: definition.cost,
                available: state.profile.skill_points,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut EngineState, env: &GameEnv<'_>) -> Result<Vec<Event>, SkillError> {
        let cost = env
            .skills()?
            .definition(&self.skill)
            .ok_or_else(|| SkillError::UnknownSkill(self.skill.clone()))?
            .cost;

        state.profile.skill_points -= cost;
        state.profile.unlocked_skills.insert(self.skill.clone());

        Ok(vec![Event::SkillUnlocked {
            id: self.skill.clone(),
        }])
    }
}
