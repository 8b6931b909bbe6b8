//! Session driver: couples the engine to a periodic tick source and to
//! the notification sink.
//!
//! The engine owns no clock. `Session` holds the single [`TimerEngine`]
//! instance behind a mutex and arms a tokio task that delivers one tick
//! per second while the engine is running. Commands and ticks mutate the
//! engine under the same mutex, so once a command that stops the timer
//! returns, no later tick can touch the state.
//!
//! Arming is idempotent: the armed flag lives in the same mutex as the
//! engine, and the tick task clears it under that lock in the critical
//! section where it decides to exit. Arming therefore never observes a
//! stale "alive" ticker, and the timer can never be double-scheduled or
//! left running without one.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};

use crate::events::Event;
use crate::notify::NotificationSink;
use crate::timer::TimerEngine;

/// Engine plus scheduling state, guarded by one mutex.
struct Shared {
    engine: TimerEngine,
    /// True while a tick task is responsible for this engine. Set by
    /// `arm()` and cleared only by the task itself, under the lock.
    ticker_armed: bool,
}

pub struct Session {
    shared: Arc<Mutex<Shared>>,
    sink: Arc<dyn NotificationSink>,
    /// Latest tick task, kept only so `Drop` can abort it.
    ticker: Option<JoinHandle<()>>,
}

impl Session {
    /// Create an idle session. Must be called within a tokio runtime,
    /// which later hosts the tick task.
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                engine: TimerEngine::new(),
                ticker_armed: false,
            })),
            sink,
            ticker: None,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let event = self.lock().engine.start();
        self.arm();
        event
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.lock().engine.pause()
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.lock().engine.reset()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Event {
        self.lock().engine.snapshot()
    }

    pub fn running(&self) -> bool {
        self.lock().engine.running()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Arm the periodic tick task. No-op when the engine is not running
    /// or a tick task is already responsible for it.
    fn arm(&mut self) {
        {
            let mut shared = self.lock();
            if !shared.engine.running() || shared.ticker_armed {
                return;
            }
            shared.ticker_armed = true;
        }
        let shared = Arc::clone(&self.shared);
        let sink = Arc::clone(&self.sink);
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // A tokio interval fires immediately; the timer's first
            // second has not elapsed yet, so consume that tick.
            interval.tick().await;
            loop {
                interval.tick().await;
                let event = {
                    let mut shared = shared.lock().unwrap_or_else(|e| e.into_inner());
                    if !shared.engine.running() {
                        // Hand responsibility back before exiting, in
                        // the same critical section as the decision.
                        shared.ticker_armed = false;
                        break;
                    }
                    let event = shared.engine.tick();
                    if matches!(event, Some(Event::BreakCompleted { .. })) {
                        shared.ticker_armed = false;
                    }
                    event
                };
                if let Some(Event::BreakCompleted { .. }) = event {
                    // Sink failures stop at this boundary.
                    if let Err(e) = sink.notify() {
                        eprintln!("notification failed: {e}");
                    }
                    break;
                }
            }
        }));
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}
