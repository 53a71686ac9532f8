//! State management module.
//!
//! Contains the Roster (shared membership state) and session identity.

mod roster;
mod session;

pub use roster::{OutboundSink, Roster};
pub use session::{SessionId, SessionIdAllocator};
