//! Interactive timer session.
//!
//! The session driver ticks in the background; this loop reads one-letter
//! commands from stdin and repaints a single status line.

use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use flowmodoro_core::{
    format_clock, notify, Config, Event, NotificationSink, NullSink, Phase, Result, Session,
    TerminalBell,
};
use tokio::time::{self, Duration};

pub fn run(quiet: bool, bell_only: bool) -> Result<()> {
    let sink = select_sink(quiet, bell_only)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(interactive(sink))
}

fn select_sink(quiet: bool, bell_only: bool) -> Result<Arc<dyn NotificationSink>> {
    if quiet {
        return Ok(Arc::new(NullSink));
    }
    if bell_only {
        return Ok(Arc::new(TerminalBell));
    }
    let config = Config::load()?;
    Ok(notify::from_config(&config.notifications))
}

async fn interactive(sink: Arc<dyn NotificationSink>) -> Result<()> {
    let mut session = Session::new(sink);
    println!("flowmodoro -- s: start/finish  p: pause  r: reset  q: quit");

    let commands = spawn_stdin_reader();
    let mut repaint = time::interval(Duration::from_millis(250));
    loop {
        repaint.tick().await;
        while let Ok(line) = commands.try_recv() {
            match line.as_str() {
                "s" | "start" => {
                    session.start();
                }
                "p" | "pause" => {
                    session.pause();
                }
                "r" | "reset" => {
                    session.reset();
                }
                "q" | "quit" => {
                    println!();
                    return Ok(());
                }
                "" => {}
                other => eprintln!("unknown command: {other}"),
            }
        }
        render(&session.snapshot());
    }
}

/// Read stdin on a plain thread; blocking reads do not mix with the
/// tick runtime.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line.trim().to_string()).is_err() {
                break;
            }
        }
    });
    rx
}

fn render(snapshot: &Event) {
    let Event::StateSnapshot {
        phase,
        running,
        display_secs,
        projected_break_secs,
        ..
    } = snapshot
    else {
        return;
    };

    let label = match (*phase, *running) {
        (Phase::Idle, _) => "ready",
        (Phase::Working, true) => "working",
        (Phase::Working, false) => "work (paused)",
        (Phase::Breaking, true) => "break",
        (Phase::Breaking, false) => "break ready",
    };

    let mut line = format!("{label:<14} {:>9}", format_clock(*display_secs));
    if let Some(projected) = projected_break_secs {
        line.push_str(&format!("   break earned: {}", format_clock(*projected)));
    }
    // Pad to cover the previous paint.
    print!("\r{line:<60}");
    let _ = std::io::stdout().flush();
}
