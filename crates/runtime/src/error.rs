//! Runtime error type shared across the store and session layers.

use progression_core::{ExecuteError, QuestId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store operation failed: {0}")]
    Store(String),

    #[error("failed to decode persisted state: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0} has a write in flight, retry after it lands")]
    QuestBusy(QuestId),

    #[error(transparent)]
    Engine(#[from] ExecuteError),
}
