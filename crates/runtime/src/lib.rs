//! Persistence boundary and session orchestration for the progression
//! engine.
//!
//! This crate wires the pure engine to its two collaborators: the
//! key/value store (two-tier, fire-and-forget writes) and the presentation
//! layer (events returned from [`Session::dispatch`]). Modules are
//! organized by responsibility:
//! - [`store`] defines the persistence contract and its implementations
//! - [`session`] hosts the per-player orchestration and write-behind worker
//! - [`oracle`] provides live oracle implementations (system clock)

mod codec;
mod error;
mod oracle;
mod session;
mod store;

pub use error::{Result, RuntimeError};
pub use oracle::SystemClock;
pub use session::Session;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreMap, TieredStore, keys};
