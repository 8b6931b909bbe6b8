//! Break-completion notification sinks.
//!
//! The engine's contract ends at emitting `BreakCompleted`; sinks turn
//! that into an audible cue. Sink failures are swallowed at the session
//! boundary and never reach timer state.

use std::io::Write;

use thiserror::Error;

use crate::config::NotificationsConfig;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Desktop notification failed: {0}")]
    Desktop(String),
}

/// External capability that renders an audible cue on break completion.
pub trait NotificationSink: Send + Sync {
    fn notify(&self) -> Result<(), NotifyError>;
}

/// Rings the terminal bell.
pub struct TerminalBell;

impl NotificationSink for TerminalBell {
    fn notify(&self) -> Result<(), NotifyError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

/// Desktop notification with the platform's completion sound.
pub struct DesktopChime;

impl NotificationSink for DesktopChime {
    fn notify(&self) -> Result<(), NotifyError> {
        notify_rust::Notification::new()
            .summary("Flowmodoro")
            .body("Break finished - ready for the next work session")
            .sound_name("complete")
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Desktop(e.to_string()))
    }
}

/// Discards notifications. Used by `--quiet` and in tests.
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Fans a notification out to several sinks. Every sink is attempted;
/// the last error, if any, is reported.
pub struct MultiSink(Vec<Box<dyn NotificationSink>>);

impl MultiSink {
    pub fn new(sinks: Vec<Box<dyn NotificationSink>>) -> Self {
        Self(sinks)
    }
}

impl NotificationSink for MultiSink {
    fn notify(&self) -> Result<(), NotifyError> {
        let mut result = Ok(());
        for sink in &self.0 {
            if let Err(e) = sink.notify() {
                result = Err(e);
            }
        }
        result
    }
}

/// Build the sink described by the notification configuration.
pub fn from_config(config: &NotificationsConfig) -> std::sync::Arc<dyn NotificationSink> {
    if !config.enabled {
        return std::sync::Arc::new(NullSink);
    }
    let mut sinks: Vec<Box<dyn NotificationSink>> = Vec::new();
    if config.terminal_bell {
        sinks.push(Box::new(TerminalBell));
    }
    if config.desktop {
        sinks.push(Box::new(DesktopChime));
    }
    if sinks.is_empty() {
        std::sync::Arc::new(NullSink)
    } else {
        std::sync::Arc::new(MultiSink::new(sinks))
    }
}
