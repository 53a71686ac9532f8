//! Session identifiers for connected clients.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identifier for one client session.
///
/// Ids are process-local, never reused, and key the roster's sink table.
/// Logs show them as `c00001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{:05}", self.0)
    }
}

/// Allocates session ids for the listener.
pub struct SessionIdAllocator {
    counter: AtomicU64,
}

impl SessionIdAllocator {
    /// Create a new allocator. The first id handed out is `c00001`.
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }

    /// Allocate the next id.
    pub fn next(&self) -> SessionId {
        SessionId(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SessionIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
