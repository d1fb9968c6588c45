//! Errors surfaced when a required oracle is missing from the environment.

use crate::error::{EngineError, ErrorSeverity};

/// A transition asked the environment for an oracle that was not provided.
///
/// This is a wiring bug in the embedding layer, not a user-recoverable
/// condition, so every variant carries `Fatal` severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("rules oracle not available")]
    RulesNotAvailable,

    #[error("skill oracle not available")]
    SkillsNotAvailable,

    #[error("achievement oracle not available")]
    AchievementsNotAvailable,

    #[error("catalog oracle not available")]
    CatalogNotAvailable,

    #[error("rng oracle not available")]
    RngNotAvailable,

    #[error("clock oracle not available")]
    ClockNotAvailable,
}

impl EngineError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RulesNotAvailable => "rules_not_available",
            Self::SkillsNotAvailable => "skills_not_available",
            Self::AchievementsNotAvailable => "achievements_not_available",
            Self::CatalogNotAvailable => "catalog_not_available",
            Self::RngNotAvailable => "rng_not_available",
            Self::ClockNotAvailable => "clock_not_available",
        }
    }
}
