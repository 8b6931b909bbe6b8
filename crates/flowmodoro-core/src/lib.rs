//! # Flowmodoro Core Library
//!
//! This library provides the core logic for the Flowmodoro proportional
//! work/break timer: work as long as you can focus, end the session
//! manually, and earn a break of one fifth of the elapsed work time
//! (one minute minimum).
//!
//! ## Architecture
//!
//! - **Timer Engine**: A discrete-step state machine. It owns no clock;
//!   a driver invokes `tick()` once per second while the timer runs.
//! - **Session**: Couples the single engine instance to a tokio tick
//!   task and to the break-completion notification sink.
//! - **Notifications**: Pluggable sinks (terminal bell, desktop chime)
//!   whose failures never reach timer state.
//! - **Config**: TOML preferences for the notification surface only;
//!   the break ratio and floor are fixed constants of the engine.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`Session`]: Tick scheduling and notification coupling
//! - [`NotificationSink`]: Trait for break-completion cues
//! - [`Config`]: Application configuration management

pub mod config;
pub mod error;
pub mod events;
pub mod notify;
pub mod session;
pub mod timer;

pub use config::{Config, NotificationsConfig};
pub use error::{ConfigError, CoreError, Result};
pub use events::Event;
pub use notify::{DesktopChime, MultiSink, NotificationSink, NotifyError, NullSink, TerminalBell};
pub use session::Session;
pub use timer::{break_for_work, format_clock, Phase, TimerEngine, BREAK_DIVISOR, MIN_BREAK_SECS};
