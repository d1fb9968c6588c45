//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionTransition};
use crate::env::GameEnv;
use crate::event::Event;
use crate::state::EngineState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the engine state and collect events
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut EngineState,
    env: &GameEnv<'_>,
) -> Result<Vec<Event>, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let events = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(events)
}

/// Routes each action variant to its transition. This is the internal
/// implementation used by `Engine::execute`.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut EngineState,
    env: &GameEnv<'_>,
) -> Result<Vec<Event>, ExecuteError> {
    match action {
        Action::AddQuest(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Quest)
        }
        Action::AddSubtask(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Quest)
        }
        Action::DeleteQuest(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Quest)
        }
        Action::CompleteQuest(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Quest)
        }
        Action::DamageSubtask(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Quest)
        }
        Action::DailyLogin(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Login)
        }
        Action::UnlockSkill(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Skill)
        }
        Action::PurchaseItem(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Purchase)
        }
        Action::SelectClass(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Profile)
        }
        Action::RecordActivity(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Profile)
        }
        Action::CompleteFocusSession(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Profile)
        }
        Action::StartRaid(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Raid)
        }
        Action::AddRaidTask(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Raid)
        }
        Action::DamageRaidTask(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Raid)
        }
        Action::AbandonRaid(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Raid)
        }
    }
}
