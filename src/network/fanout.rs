//! Fan-out delivery to session outbound queues.
//!
//! Delivery never blocks the sending session and never turns one slow or
//! dying peer into an error for everyone else.

use parlor_proto::Reply;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::state::{OutboundSink, SessionId};

/// Queue one reply for a single session.
///
/// A closed queue means the session is tearing down; its own task handles
/// cleanup and the reply is skipped. A full queue means the peer is not
/// draining and the reply is dropped for that peer only.
pub fn deliver(id: SessionId, sink: &OutboundSink, reply: &Reply) -> bool {
    match sink.try_send(reply.clone()) {
        Ok(()) => true,
        Err(TrySendError::Closed(_)) => {
            debug!(%id, "Skipping closed session queue");
            false
        }
        Err(TrySendError::Full(_)) => {
            warn!(%id, "Session queue full, dropping reply");
            false
        }
    }
}

/// Queue one reply for every sink in the snapshot, skipping failures.
///
/// Returns how many queues accepted the reply.
pub fn deliver_all(sinks: &[(SessionId, OutboundSink)], reply: &Reply) -> usize {
    sinks
        .iter()
        .filter(|(id, sink)| deliver(*id, sink, reply))
        .count()
}
