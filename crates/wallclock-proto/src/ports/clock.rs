use chrono::{DateTime, Utc};

/// Source of the current wall-clock time.
///
/// Implementations must return strictly increasing instants across
/// successive calls spaced by real elapsed time; the pipeline relies on
/// this to keep renders in tick order.
pub trait WallClockPort: Send + Sync {
    /// Read the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClockPort for SystemWallClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
