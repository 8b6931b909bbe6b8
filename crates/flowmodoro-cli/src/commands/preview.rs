use flowmodoro_core::{break_for_work, format_clock, Result};
use serde_json::json;

pub fn run(work: u64) -> Result<()> {
    let break_secs = break_for_work(work);
    let payload = json!({
        "work_secs": work,
        "work_clock": format_clock(work),
        "break_secs": break_secs,
        "break_clock": format_clock(break_secs),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
