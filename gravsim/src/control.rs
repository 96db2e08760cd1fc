//! Time-scale control channel for the headless runner.
//!
//! A background thread reads one command per line from stdin and pushes it
//! into the shared [`TimeScale`]. A command is either a plain number
//! (`2.5`) or `time_scale=2.5`. Rejected input is logged and ignored.

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use tracing::{info, warn};

use crate::error::{ensure_positive, SimError, SimResult};
use crate::simulation::time_scale::TimeScale;

pub fn parse_time_scale(line: &str) -> SimResult<f64> {
    let line = line.trim();
    let raw = line
        .strip_prefix("time_scale")
        .map(|rest| rest.trim_start().trim_start_matches('=').trim())
        .unwrap_or(line);

    let value: f64 = raw
        .parse()
        .map_err(|_| SimError::invalid("time_scale", line, "expected a number"))?;
    ensure_positive("time_scale", value)
}

/// Apply one control line to `handle`
pub fn apply_command(handle: &TimeScale, line: &str) -> SimResult<f64> {
    let value = parse_time_scale(line)?;
    handle.set(value)?;
    Ok(value)
}

/// Spawn the stdin listener. The thread ends when stdin closes.
pub fn spawn_stdin_listener(handle: TimeScale) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("time-scale-control".into())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!(error = %e, "control channel read failed");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match apply_command(&handle, &line) {
                    Ok(value) => info!(time_scale = value, "time scale updated"),
                    Err(e) => warn!(error = %e, "time scale update rejected"),
                }
            }
        })
}
