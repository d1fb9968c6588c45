//! Error types for the action execution pipeline.

use crate::action::{LoginError, ProfileError, PurchaseError, QuestError, RaidError, SkillError};
use crate::error::{EngineError, ErrorSeverity};
use crate::state::InvariantViolation;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the engine.
///
/// The variant groups follow the action modules; severity and error codes
/// delegate to the wrapped domain error so the session layer can decide
/// between an `Event::Error` and a hard failure.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ExecuteError {
    #[error("quest action failed: {0}")]
    Quest(TransitionPhaseError<QuestError>),

    #[error("daily login failed: {0}")]
    Login(TransitionPhaseError<LoginError>),

    #[error("skill unlock failed: {0}")]
    Skill(TransitionPhaseError<SkillError>),

    #[error("purchase failed: {0}")]
    Purchase(TransitionPhaseError<PurchaseError>),

    #[error("profile action failed: {0}")]
    Profile(TransitionPhaseError<ProfileError>),

    #[error("raid action failed: {0}")]
    Raid(TransitionPhaseError<RaidError>),

    #[error("state invariant violated after transition: {0}")]
    InvariantViolated(#[from] InvariantViolation),
}

impl ExecuteError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Quest(inner) => inner.error.severity(),
            Self::Login(inner) => inner.error.severity(),
            Self::Skill(inner) => inner.error.severity(),
            Self::Purchase(inner) => inner.error.severity(),
            Self::Profile(inner) => inner.error.severity(),
            Self::Raid(inner) => inner.error.severity(),
            Self::InvariantViolated(inner) => inner.severity(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Quest(inner) => inner.error.error_code(),
            Self::Login(inner) => inner.error.error_code(),
            Self::Skill(inner) => inner.error.error_code(),
            Self::Purchase(inner) => inner.error.error_code(),
            Self::Profile(inner) => inner.error.error_code(),
            Self::Raid(inner) => inner.error.error_code(),
            Self::InvariantViolated(inner) => inner.error_code(),
        }
    }
}
