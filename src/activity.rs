//! Activity log sinks.
//!
//! Every server event (handshake steps, joins, commands, chat deliveries)
//! is recorded through [`ActivityLog`]. Session tasks never block on the
//! sink; implementations return quickly and swallow their own failures.
//! The wire protocol stays independent of whatever views the log.

use parking_lot::Mutex;
use tracing::info;

/// Actor label for events the server itself records (handshake steps,
/// joins, disconnects). Eight spaces wide, matching the name column of
/// user-attributed entries.
pub const SYSTEM_ACTOR: &str = "        ";

/// Format one transcript line: `<actor> (<stamp>) : <text>`.
pub fn format_entry(actor: &str, stamp: &str, text: &str) -> String {
    format!("{} ({}) : {}", actor, stamp, text)
}

/// A sink for the relay's activity stream.
///
/// `record` is called from session tasks, including inside chat fan-out,
/// so it must be cheap.
pub trait ActivityLog: Send + Sync {
    /// Record one event.
    fn record(&self, actor: &str, stamp: &str, text: &str);

    /// Record a raw line outside the entry format, such as the day banner
    /// written at startup.
    fn banner(&self, line: &str);
}

/// Forwards the activity stream to `tracing` under the `activity` target.
pub struct TracingLog;

impl ActivityLog for TracingLog {
    fn record(&self, actor: &str, stamp: &str, text: &str) {
        info!(target: "activity", "{}", format_entry(actor, stamp, text));
    }

    fn banner(&self, line: &str) {
        info!(target: "activity", "{}", line);
    }
}

/// Keeps the activity stream in memory, oldest entry first.
#[derive(Default)]
pub struct Transcript {
    lines: Mutex<Vec<String>>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl ActivityLog for Transcript {
    fn record(&self, actor: &str, stamp: &str, text: &str) {
        self.lines.lock().push(format_entry(actor, stamp, text));
    }

    fn banner(&self, line: &str) {
        self.lines.lock().push(line.to_owned());
    }
}

/// Discards the activity stream.
pub struct NoopLog;

impl ActivityLog for NoopLog {
    fn record(&self, _actor: &str, _stamp: &str, _text: &str) {}

    fn banner(&self, _line: &str) {}
}
