//! Roster - the relay's shared membership state.
//!
//! One mutex guards both the claimed names and the outbound sinks, so a
//! name claim can never interleave with another session claiming the same
//! name. Nothing does I/O while holding the lock; broadcast and listing
//! work on snapshots taken under it.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use parlor_proto::Reply;
use tokio::sync::mpsc;

use crate::state::SessionId;

/// Sending half of one session's outbound queue.
pub type OutboundSink = mpsc::Sender<Reply>;

#[derive(Default)]
struct RosterInner {
    names: HashSet<String>,
    sinks: HashMap<SessionId, OutboundSink>,
}

/// Shared roster of connected sessions.
///
/// Between a session's registration and its cleanup, the roster holds both
/// its claimed name and its sink. `release` and `remove_sink` are
/// idempotent so cleanup can run on any exit path.
#[derive(Default)]
pub struct Roster {
    inner: Mutex<RosterInner>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claim `name` for a session.
    ///
    /// Returns `false` without changing anything when the name is already
    /// claimed. This is the only correctness-critical section in the
    /// relay: the membership check and the insert happen under one lock.
    pub fn try_claim(&self, name: &str) -> bool {
        let mut inner = self.inner.lock();
        if inner.names.contains(name) {
            false
        } else {
            inner.names.insert(name.to_owned());
            true
        }
    }

    /// Release a claimed name. Calling this for a name that was never
    /// claimed, or twice for the same name, is a no-op.
    pub fn release(&self, name: &str) {
        self.inner.lock().names.remove(name);
    }

    /// Register a session's outbound sink.
    pub fn add_sink(&self, id: SessionId, sink: OutboundSink) {
        self.inner.lock().sinks.insert(id, sink);
    }

    /// Remove a session's outbound sink. Idempotent.
    pub fn remove_sink(&self, id: SessionId) {
        self.inner.lock().sinks.remove(&id);
    }

    /// Snapshot the registered sinks for fan-out outside the lock.
    ///
    /// Senders are cheap clones; a session that disappears after the
    /// snapshot shows up as a closed queue during delivery.
    pub fn snapshot_sinks(&self) -> Vec<(SessionId, OutboundSink)> {
        self.inner
            .lock()
            .sinks
            .iter()
            .map(|(id, sink)| (*id, sink.clone()))
            .collect()
    }

    /// Snapshot the claimed names in sorted order, optionally excluding
    /// one name.
    pub fn snapshot_names(&self, excluding: Option<&str>) -> Vec<String> {
        let inner = self.inner.lock();
        let mut names: Vec<String> = inner
            .names
            .iter()
            .filter(|name| excluding != Some(name.as_str()))
            .cloned()
            .collect();
        drop(inner);
        names.sort();
        names
    }

    /// Current sizes of the name set and the sink table.
    pub fn counts(&self) -> (usize, usize) {
        let inner = self.inner.lock();
        (inner.names.len(), inner.sinks.len())
    }
}
