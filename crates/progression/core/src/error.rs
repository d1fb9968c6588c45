//! Common error infrastructure for progression-core.
//!
//! Domain-specific errors (e.g., `QuestError`, `SkillError`) are defined in
//! their respective modules alongside the actions they validate. This module
//! provides the shared severity classification callers use to decide between
//! surfacing a failure to the UI and aborting the operation.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: rule violations the user can resolve (earn more points,
///   pick another skill) — surfaced to the presentation layer as an error event
/// - **Validation**: malformed input, rejected before any state change
/// - **Internal**: unexpected state inconsistency, indicates a rules-table bug
/// - **Fatal**: the operation cannot run at all (e.g., a required oracle is missing)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Rule violation - can retry once the precondition is satisfied.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: level-up loop exceeding its bound, derived HP out of range.
    /// These indicate bugs and must never be clamped and ignored.
    Internal,

    /// Fatal error - the engine cannot execute at all.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error can be surfaced to the user as an error
    /// event rather than propagated as a hard failure.
    pub const fn is_surfaceable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all progression-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait EngineError: std::fmt::Display + std::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, `Event::Error` payloads, and testing.
    fn error_code(&self) -> &'static str;
}
