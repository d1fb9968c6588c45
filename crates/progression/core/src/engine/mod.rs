//! The profile update orchestrator.
//!
//! [`Engine`] is the authoritative reducer for [`EngineState`]. Every user
//! action runs through the same three-phase pipeline; the engine snapshots
//! the state first and restores it on any failure, so a rejected or
//! internally-failed operation is never partially applied.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::env::GameEnv;
use crate::event::Event;
use crate::state::EngineState;

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionOutcome {
    /// UI-facing events in emission order, interpreted by the presentation
    /// layer (toasts, sounds, confetti).
    pub events: Vec<Event>,
}

/// Engine that sequences validation, reward math, and state mutation into
/// one atomic-looking update per user action.
pub struct Engine<'a> {
    state: &'a mut EngineState,
}

impl<'a> Engine<'a> {
    /// Creates a new engine over the given state.
    pub fn new(state: &'a mut EngineState) -> Self {
        Self { state }
    }

    /// Executes an action by routing it through the transition pipeline.
    ///
    /// On success the action nonce is incremented and the profile
    /// invariants are re-verified; a violation rolls the state back and
    /// surfaces as `ExecuteError::InvariantViolated` so a rules-table bug
    /// is never silently persisted. On any error the state is exactly what
    /// it was before the call.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &crate::action::Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let before = self.state.clone();

        match transition::execute_transition(action, self.state, &env) {
            Ok(events) => {
                if let Err(violation) = self.state.check_invariants() {
                    *self.state = before;
                    return Err(ExecuteError::InvariantViolated(violation));
                }
                self.state.nonce += 1;
                Ok(ExecutionOutcome { events })
            }
            Err(error) => {
                *self.state = before;
                Err(error)
            }
        }
    }
}
