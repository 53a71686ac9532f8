//! Network module.
//!
//! Contains the Listener (TCP accept loop), the per-session Connection
//! handler, and fan-out delivery.

mod connection;
pub mod fanout;
mod listener;

pub use connection::Connection;
pub use listener::Listener;
