// src/input.rs

//! Operator commands typed on stdin during an interactive dashboard run.

use std::io::BufRead;
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::controller::ControlEvent;

pub const HELP: &str = "commands: start [speed 1-10] | pause | step | reset | report | quit";

/// Parse one line. Returns `None` for anything that is not a command.
pub fn parse_command(line: &str) -> Option<ControlEvent> {
    let mut words = line.split_whitespace();
    let verb = words.next()?.to_ascii_lowercase();
    let arg = words.next();

    let event = match verb.as_str() {
        "start" | "run" => ControlEvent::Start {
            speed: match arg {
                Some(raw) => Some(raw.parse().ok()?),
                None => None,
            },
        },
        "pause" | "p" => ControlEvent::Pause,
        "step" | "s" => ControlEvent::Step,
        "reset" | "r" => ControlEvent::Reset,
        "report" => ControlEvent::ViewReport,
        "quit" | "q" | "exit" => ControlEvent::Shutdown,
        _ => return None,
    };
    Some(event)
}

/// Read stdin line by line on a plain thread and forward commands.
///
/// A blocking thread is used so a pending read never holds up runtime
/// shutdown. End of input is treated as `quit`.
pub fn spawn_stdin_reader(tx: mpsc::Sender<ControlEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    warn!(error = %e, "failed to read stdin; stopping command reader");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(event) => {
                    debug!(?event, "operator command");
                    if tx.blocking_send(event).is_err() {
                        return;
                    }
                }
                None => eprintln!("unrecognised command '{}'; {HELP}", line.trim()),
            }
        }
        let _ = tx.blocking_send(ControlEvent::Shutdown);
    })
}
