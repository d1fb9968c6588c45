//! Clock oracle: the only way wall-clock time enters the engine.
//!
//! Deadlines and streak accounting are functions of "now" and "today"; by
//! routing both through a trait, every transition stays a pure function of
//! its inputs and calendar edge cases become trivially testable.

use chrono::{DateTime, NaiveDate, Utc};

/// Read-only time source.
pub trait ClockOracle: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar day, used by the streak accountant.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock pinned to a fixed instant. The standard choice in tests and
/// replays.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Pins the clock to midnight UTC on the given date.
    pub fn at_midnight(date: NaiveDate) -> Self {
        Self(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
    }
}

impl ClockOracle for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
