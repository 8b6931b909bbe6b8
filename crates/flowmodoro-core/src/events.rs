use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the engine produces an Event.
/// The display layer polls snapshots; the session driver feeds
/// `BreakCompleted` to the notification sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A work session began (Idle -> Working).
    WorkStarted { at: DateTime<Utc> },
    /// The work session was ended manually and the break was computed
    /// (Working -> Breaking).
    WorkFinished {
        work_secs: u64,
        break_secs: u64,
        at: DateTime<Utc>,
    },
    /// The break countdown started or resumed.
    BreakStarted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Paused {
        phase: Phase,
        display_secs: u64,
        at: DateTime<Utc>,
    },
    Reset { at: DateTime<Utc> },
    /// The break countdown reached zero (Breaking -> Idle). Emitted
    /// exactly once per exhaustion; triggers the notification sink.
    BreakCompleted { work_secs: u64, at: DateTime<Utc> },
    StateSnapshot {
        phase: Phase,
        work_secs: u64,
        break_secs: u64,
        running: bool,
        display_secs: u64,
        projected_break_secs: Option<u64>,
        at: DateTime<Utc>,
    },
}
