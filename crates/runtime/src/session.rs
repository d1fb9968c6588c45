//! Session orchestration: one live player, one in-memory state.
//!
//! The session loads state from the store once at startup, keeps the
//! authoritative copy in memory, and hands every computed update to a
//! write-behind worker without awaiting completion. A per-quest in-flight
//! set serializes dispatches that touch a quest whose previous write has
//! not yet drained — the one real race at the persistence boundary.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use progression_content::ContentPack;
use progression_core::{
    AchievementOracle, Action, CatalogOracle, ClockOracle, Engine, Env, Event, GameEnv, PcgRng,
    QuestId, RngOracle, RulesConfig, RulesOracle, SkillOracle,
};

use crate::codec;
use crate::error::{Result, RuntimeError};
use crate::store::{KeyValueStore, StoreMap};

enum WriteRequest {
    Persist {
        entries: StoreMap,
        quest: Option<QuestId>,
    },
    Flush(oneshot::Sender<()>),
}

/// A live engine session bound to a store.
pub struct Session {
    state: progression_core::EngineState,
    rules: RulesConfig,
    content: ContentPack,
    rng: PcgRng,
    clock: Arc<dyn ClockOracle>,
    writer: mpsc::UnboundedSender<WriteRequest>,
    write_acks: mpsc::UnboundedReceiver<Option<QuestId>>,
    in_flight: HashSet<QuestId>,
}

impl Session {
    /// Loads state from the store and spawns the write-behind worker.
    ///
    /// Must run inside a tokio runtime. `fallback_seed` seeds the RNG for
    /// installs that have no persisted engine metadata yet; live callers
    /// pass something environmental (e.g. startup timestamp), tests pass a
    /// constant.
    pub fn start(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn ClockOracle>,
        rules: RulesConfig,
        content: ContentPack,
        fallback_seed: u64,
    ) -> Result<Self> {
        let state = codec::load_state(store.as_ref(), fallback_seed)?;
        tracing::debug!(
            level = state.profile.level,
            quests = state.quests.len(),
            nonce = state.nonce,
            "session state loaded"
        );

        let (writer, requests) = mpsc::unbounded_channel();
        let (ack_sender, write_acks) = mpsc::unbounded_channel();
        tokio::spawn(write_worker(store, requests, ack_sender));

        Ok(Self {
            state,
            rules,
            content,
            rng: PcgRng,
            clock,
            writer,
            write_acks,
            in_flight: HashSet::new(),
        })
    }

    pub fn state(&self) -> &progression_core::EngineState {
        &self.state
    }

    /// Executes one user action and returns the events for the UI.
    ///
    /// Recoverable rule violations come back as a single `Event::Error`
    /// with the state untouched; internal failures propagate as hard
    /// errors and nothing is persisted.
    pub fn dispatch(&mut self, action: &Action) -> Result<Vec<Event>> {
        self.drain_write_acks();
        if let Some(quest) = guarded_quest(action)
            && self.in_flight.contains(&quest)
        {
            return Err(RuntimeError::QuestBusy(quest));
        }

        let env: GameEnv<'_> = Env::new(
            Some(&self.rules as &dyn RulesOracle),
            Some(&self.content as &dyn SkillOracle),
            Some(&self.content as &dyn AchievementOracle),
            Some(&self.content as &dyn CatalogOracle),
            Some(&self.rng as &dyn RngOracle),
            Some(self.clock.as_ref()),
        );

        let result = Engine::new(&mut self.state).execute(env, action);
        match result {
            Ok(outcome) => {
                self.persist(action)?;
                Ok(outcome.events)
            }
            Err(error) if error.severity().is_surfaceable() => {
                tracing::debug!(
                    action = action.as_snake_case(),
                    code = error.error_code(),
                    "rule violation surfaced to UI"
                );
                Ok(vec![Event::Error {
                    code: error.error_code().to_owned(),
                }])
            }
            Err(error) => {
                tracing::error!(
                    action = action.as_snake_case(),
                    %error,
                    "engine failure, nothing persisted"
                );
                Err(RuntimeError::Engine(error))
            }
        }
    }

    /// Waits until every queued write has been handed to the store. Used
    /// on shutdown and by tests; normal dispatches never await this.
    pub async fn flush(&mut self) {
        let (done, wait) = oneshot::channel();
        if self.writer.send(WriteRequest::Flush(done)).is_ok() {
            let _ = wait.await;
        }
        self.drain_write_acks();
    }

    fn persist(&mut self, action: &Action) -> Result<()> {
        let entries = codec::entries_for(&self.state, action)?;
        let quest = guarded_quest(action);
        if let Some(quest) = quest {
            self.in_flight.insert(quest);
        }
        // Fire-and-forget: a dropped worker only means shutdown
        let _ = self.writer.send(WriteRequest::Persist { entries, quest });
        Ok(())
    }

    fn drain_write_acks(&mut self) {
        while let Ok(ack) = self.write_acks.try_recv() {
            if let Some(quest) = ack {
                self.in_flight.remove(&quest);
            }
        }
    }
}

/// The quest whose reward path an action runs, if any. Only reward-bearing
/// operations need serialization; quest CRUD is safe to interleave.
fn guarded_quest(action: &Action) -> Option<QuestId> {
    match action {
        Action::CompleteQuest(action) => Some(action.quest),
        Action::DamageSubtask(action) => Some(action.quest),
        _ => None,
    }
}

/// Background task applying queued writes to the store in order.
async fn write_worker(
    store: Arc<dyn KeyValueStore>,
    mut requests: mpsc::UnboundedReceiver<WriteRequest>,
    acks: mpsc::UnboundedSender<Option<QuestId>>,
) {
    while let Some(request) = requests.recv().await {
        match request {
            WriteRequest::Persist { entries, quest } => {
                if let Err(error) = store.set(entries) {
                    tracing::warn!(%error, "persistence write failed, state kept in memory");
                }
                let _ = acks.send(quest);
            }
            WriteRequest::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
