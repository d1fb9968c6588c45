//! Concrete oracle implementations for live sessions.

use chrono::{DateTime, Utc};

use progression_core::ClockOracle;

/// Wall-clock backed time source for live sessions. Tests pin a
/// [`FixedClock`](progression_core::FixedClock) instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ClockOracle for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
