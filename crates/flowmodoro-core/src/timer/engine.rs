//! Timer engine implementation.
//!
//! The timer engine is a discrete-step state machine. It does not use
//! internal threads or read the clock - the caller is responsible for
//! calling `tick()` once per second while the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Working -> Breaking -> Idle
//! ```
//!
//! `start` drives the forward transitions: it begins a work session from
//! Idle, ends the work session from Working (computing the earned break),
//! and starts or resumes the countdown from Breaking. The break finishing
//! on its own is the only transition `tick()` performs.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.start();
//! // Once per second while engine.running():
//! engine.tick(); // Returns Some(Event::BreakCompleted) when the break ends
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Divisor applied to accumulated work seconds to derive the break length.
pub const BREAK_DIVISOR: u64 = 5;

/// Minimum break length in seconds, applied regardless of the ratio result.
pub const MIN_BREAK_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Working,
    Breaking,
}

/// Break earned by `work_secs` of accumulated work.
pub fn break_for_work(work_secs: u64) -> u64 {
    (work_secs / BREAK_DIVISOR).max(MIN_BREAK_SECS)
}

/// Core timer engine.
///
/// All commands are total: when a guard fails the command is a no-op and
/// returns `None`. There are no fallible operations.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    phase: Phase,
    /// Seconds accumulated while Working.
    work_secs: u64,
    /// Seconds remaining while Breaking. Computed exactly once, at the
    /// Working -> Breaking transition; never recomputed afterwards.
    break_secs: u64,
    running: bool,
}

impl TimerEngine {
    /// Create a new engine in the `Idle` phase with all counters zero.
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            work_secs: 0,
            break_secs: 0,
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn work_secs(&self) -> u64 {
        self.work_secs
    }

    pub fn break_secs(&self) -> u64 {
        self.break_secs
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Seconds the display layer should show for the current phase.
    pub fn display_secs(&self) -> u64 {
        match self.phase {
            Phase::Working => self.work_secs,
            Phase::Breaking => self.break_secs,
            Phase::Idle => 0,
        }
    }

    /// Break the current work session would earn if ended now.
    /// Only meaningful while Working.
    pub fn projected_break_secs(&self) -> Option<u64> {
        match self.phase {
            Phase::Working => Some(break_for_work(self.work_secs)),
            _ => None,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            work_secs: self.work_secs,
            break_secs: self.break_secs,
            running: self.running,
            display_secs: self.display_secs(),
            projected_break_secs: self.projected_break_secs(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance to the next phase: begin work, finish work, or start the
    /// break countdown.
    ///
    /// Starting the countdown with an exhausted break is a no-op,
    /// mirroring a disabled control rather than an error.
    pub fn start(&mut self) -> Option<Event> {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Working;
                self.work_secs = 0;
                self.running = true;
                Some(Event::WorkStarted { at: Utc::now() })
            }
            Phase::Working => {
                self.running = false;
                self.break_secs = break_for_work(self.work_secs);
                self.phase = Phase::Breaking;
                Some(Event::WorkFinished {
                    work_secs: self.work_secs,
                    break_secs: self.break_secs,
                    at: Utc::now(),
                })
            }
            Phase::Breaking => {
                if self.break_secs == 0 || self.running {
                    return None;
                }
                self.running = true;
                Some(Event::BreakStarted {
                    remaining_secs: self.break_secs,
                    at: Utc::now(),
                })
            }
        }
    }

    /// Stop counting without changing phase.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::Paused {
            phase: self.phase,
            display_secs: self.display_secs(),
            at: Utc::now(),
        })
    }

    /// Return to the initial state. Valid from any phase.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = Phase::Idle;
        self.work_secs = 0;
        self.break_secs = 0;
        self.running = false;
        Some(Event::Reset { at: Utc::now() })
    }

    /// Advance the timer by one second.
    ///
    /// Only mutates state while `running`; a stray call while idle or
    /// paused is tolerated as a no-op. The tick that takes the break
    /// remaining time to zero atomically returns to Idle, stops the
    /// timer, and returns `Event::BreakCompleted` exactly once.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        match self.phase {
            Phase::Working => {
                self.work_secs = self.work_secs.saturating_add(1);
                None
            }
            Phase::Breaking => {
                if self.break_secs > 1 {
                    self.break_secs -= 1;
                    return None;
                }
                self.break_secs = 0;
                self.running = false;
                self.phase = Phase::Idle;
                Some(Event::BreakCompleted {
                    work_secs: self.work_secs,
                    at: Utc::now(),
                })
            }
            Phase::Idle => None,
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl TimerEngine {
    /// Construct an engine in an arbitrary state.
    pub(crate) fn with_state(phase: Phase, work_secs: u64, break_secs: u64, running: bool) -> Self {
        Self {
            phase,
            work_secs,
            break_secs,
            running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the engine into Breaking with `work_secs` of accumulated work.
    fn engine_after_work(work_secs: u64) -> TimerEngine {
        let mut engine = TimerEngine::new();
        engine.start();
        for _ in 0..work_secs {
            engine.tick();
        }
        engine.start();
        engine
    }

    #[test]
    fn start_from_idle_begins_work() {
        let mut engine = TimerEngine::new();
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(!engine.running());

        let event = engine.start();
        assert!(matches!(event, Some(Event::WorkStarted { .. })));
        assert_eq!(engine.phase(), Phase::Working);
        assert_eq!(engine.work_secs(), 0);
        assert!(engine.running());
    }

    #[test]
    fn second_start_finishes_work_not_idempotent() {
        // `start` while Working is the Working -> Breaking transition,
        // not a repeat of the Idle -> Working one.
        let mut engine = TimerEngine::new();
        engine.start();
        let event = engine.start();
        assert!(matches!(event, Some(Event::WorkFinished { .. })));
        assert_eq!(engine.phase(), Phase::Breaking);
        assert!(!engine.running());
    }

    #[test]
    fn working_ticks_accumulate() {
        let mut engine = TimerEngine::new();
        engine.start();
        for _ in 0..90 {
            assert!(engine.tick().is_none());
        }
        assert_eq!(engine.work_secs(), 90);
        assert_eq!(engine.display_secs(), 90);
    }

    #[test]
    fn break_computation_vectors() {
        for (work, expected) in [(0, 60), (299, 60), (300, 60), (305, 61), (1000, 200)] {
            let engine = engine_after_work(work);
            assert_eq!(
                engine.break_secs(),
                expected,
                "work_secs = {work} should earn a {expected}s break"
            );
        }
    }

    #[test]
    fn break_is_computed_once_not_recomputed() {
        let mut engine = engine_after_work(1000);
        assert_eq!(engine.break_secs(), 200);
        engine.start();
        engine.tick();
        engine.pause();
        engine.start();
        assert_eq!(engine.break_secs(), 199);
    }

    #[test]
    fn countdown_reaches_zero_and_completes_once() {
        let mut engine = engine_after_work(0);
        assert_eq!(engine.break_secs(), 60);
        engine.start();
        assert!(engine.running());

        let mut completions = 0;
        for _ in 0..60 {
            if let Some(Event::BreakCompleted { .. }) = engine.tick() {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.break_secs(), 0);
        assert!(!engine.running());

        // Further ticks are stray calls: no state change, no second event.
        assert!(engine.tick().is_none());
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn countdown_strictly_decrements() {
        let mut engine = engine_after_work(600);
        engine.start();
        let mut previous = engine.break_secs();
        while engine.phase() == Phase::Breaking {
            engine.tick();
            assert!(engine.break_secs() < previous);
            previous = engine.break_secs();
        }
    }

    #[test]
    fn tick_in_idle_is_noop() {
        let mut engine = TimerEngine::new();
        assert!(engine.tick().is_none());
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.work_secs(), 0);
        assert_eq!(engine.break_secs(), 0);
        assert!(!engine.running());
    }

    #[test]
    fn pause_freezes_counters() {
        let mut engine = TimerEngine::new();
        engine.start();
        engine.tick();
        engine.tick();
        assert!(matches!(engine.pause(), Some(Event::Paused { .. })));

        for _ in 0..10 {
            assert!(engine.tick().is_none());
        }
        assert_eq!(engine.work_secs(), 2);
        assert_eq!(engine.phase(), Phase::Working);

        // Pausing an already paused timer emits nothing.
        assert!(engine.pause().is_none());
    }

    #[test]
    fn resume_break_continues_where_it_left_off() {
        let mut engine = engine_after_work(500);
        engine.start();
        for _ in 0..30 {
            engine.tick();
        }
        assert_eq!(engine.break_secs(), 70);

        engine.pause();
        for _ in 0..10 {
            engine.tick();
        }
        assert_eq!(engine.break_secs(), 70);

        let event = engine.start();
        assert!(matches!(
            event,
            Some(Event::BreakStarted {
                remaining_secs: 70,
                ..
            })
        ));
        engine.tick();
        assert_eq!(engine.break_secs(), 69);
    }

    #[test]
    fn start_with_exhausted_break_is_noop() {
        // Breaking with break_secs == 0 is unreachable through commands
        // alone (exhaustion jumps straight to Idle), but the guard must
        // still hold for it.
        let mut engine = TimerEngine::with_state(Phase::Breaking, 120, 0, false);
        assert!(engine.start().is_none());
        assert_eq!(engine.phase(), Phase::Breaking);
        assert_eq!(engine.break_secs(), 0);
        assert!(!engine.running());
    }

    #[test]
    fn start_while_breaking_and_running_is_noop() {
        let mut engine = engine_after_work(0);
        engine.start();
        assert!(engine.start().is_none());
        assert_eq!(engine.break_secs(), 60);
        assert!(engine.running());
    }

    #[test]
    fn reset_from_every_phase() {
        let mut idle = TimerEngine::new();
        assert!(matches!(idle.reset(), Some(Event::Reset { .. })));

        let mut working = TimerEngine::new();
        working.start();
        working.tick();
        working.reset();
        assert_eq!(working.phase(), Phase::Idle);
        assert_eq!(working.work_secs(), 0);
        assert_eq!(working.break_secs(), 0);
        assert!(!working.running());

        let mut breaking = engine_after_work(400);
        breaking.start();
        breaking.tick();
        breaking.reset();
        assert_eq!(breaking.phase(), Phase::Idle);
        assert_eq!(breaking.work_secs(), 0);
        assert_eq!(breaking.break_secs(), 0);
        assert!(!breaking.running());
    }

    #[test]
    fn restart_after_reset_zeroes_work() {
        let mut engine = TimerEngine::new();
        engine.start();
        for _ in 0..42 {
            engine.tick();
        }
        engine.reset();
        engine.start();
        assert_eq!(engine.work_secs(), 0);
        assert_eq!(engine.phase(), Phase::Working);
    }

    #[test]
    fn projected_break_only_while_working() {
        let mut engine = TimerEngine::new();
        assert_eq!(engine.projected_break_secs(), None);
        engine.start();
        assert_eq!(engine.projected_break_secs(), Some(60));
        for _ in 0..305 {
            engine.tick();
        }
        assert_eq!(engine.projected_break_secs(), Some(61));
        engine.start();
        assert_eq!(engine.projected_break_secs(), None);
    }

    #[test]
    fn display_secs_follows_phase() {
        let mut engine = TimerEngine::new();
        assert_eq!(engine.display_secs(), 0);
        engine.start();
        engine.tick();
        assert_eq!(engine.display_secs(), 1);
        engine.start();
        assert_eq!(engine.display_secs(), 60);
        engine.reset();
        assert_eq!(engine.display_secs(), 0);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut engine = TimerEngine::new();
        engine.start();
        engine.tick();
        match engine.snapshot() {
            Event::StateSnapshot {
                phase,
                work_secs,
                running,
                display_secs,
                projected_break_secs,
                ..
            } => {
                assert_eq!(phase, Phase::Working);
                assert_eq!(work_secs, 1);
                assert!(running);
                assert_eq!(display_secs, 1);
                assert_eq!(projected_break_secs, Some(60));
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
