//! Connection - handles an individual client session.
//!
//! Each connection runs in its own tokio task, in two phases:
//!
//! ```text
//! Phase 1: Handshake (sequential on the socket)
//!     SUBMITNAME prompt loop until the roster accepts a claim
//!    ↓
//! Phase 2: Relay loop (tokio::select!)
//!    ┌──────────────────────────────────────────────┐
//!    │               Session Task                   │
//!    │                                              │
//!    │   socket lines ──► classify ──► roster       │
//!    │        ▲                        snapshot     │
//!    │        │                           │         │
//!    │   framed writer ◄── outbound ◄── fan-out     │
//!    │                     queue (from all tasks)   │
//!    └──────────────────────────────────────────────┘
//! ```
//!
//! Cleanup is owned by a drop guard, so the claimed name and the
//! registered sink are released on every exit path.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use parlor_proto::{clock_stamp, Command, Reply, RelayCodec};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::Framed;
use tracing::{debug, info, instrument, warn};

use crate::activity::{ActivityLog, SYSTEM_ACTOR};
use crate::network::fanout;
use crate::state::{Roster, SessionId};

/// Outbound queue capacity per session.
const OUTBOUND_QUEUE_SIZE: usize = 32;

/// A client session handler, generic over the byte stream so tests can
/// drive it through an in-memory duplex pipe.
pub struct Connection<S> {
    id: SessionId,
    peer: String,
    roster: Arc<Roster>,
    activity: Arc<dyn ActivityLog>,
    framed: Framed<S, RelayCodec>,
}

/// Releases whatever the session actually acquired. Runs on every exit
/// path, including panics; both roster operations are idempotent.
struct CleanupGuard {
    roster: Arc<Roster>,
    id: SessionId,
    name: Option<String>,
    sink_registered: bool,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Some(name) = self.name.take() {
            self.roster.release(&name);
        }
        if self.sink_registered {
            self.roster.remove_sink(self.id);
        }
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> Connection<S> {
    /// Create a new session handler.
    pub fn new(
        id: SessionId,
        stream: S,
        peer: String,
        roster: Arc<Roster>,
        activity: Arc<dyn ActivityLog>,
    ) -> Self {
        Self {
            id,
            peer,
            roster,
            activity,
            framed: Framed::new(stream, RelayCodec::new()),
        }
    }

    /// Run the session to completion.
    #[instrument(skip(self), fields(id = %self.id, peer = %self.peer), name = "session")]
    pub async fn run(mut self) -> anyhow::Result<()> {
        info!("Client connected");

        let mut guard = CleanupGuard {
            roster: Arc::clone(&self.roster),
            id: self.id,
            name: None,
            sink_registered: false,
        };

        // Phase 1: claim a screen name. The prompt is re-sent before every
        // attempt and the loop only ends on a successful claim or a dead
        // socket. There is no attempt limit.
        let name = loop {
            self.framed.send(Reply::SubmitName).await?;

            let line = match self.framed.next().await {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    debug!(error = %e, "Read error during handshake");
                    return Ok(());
                }
                None => {
                    info!("Client disconnected during handshake");
                    return Ok(());
                }
            };

            // Every submission is recorded, accepted or not.
            self.activity.record(
                SYSTEM_ACTOR,
                &clock_stamp(),
                &format!("{} SUBMITNAME", line),
            );

            if self.roster.try_claim(&line) {
                break line;
            }
            debug!(name = %line, "Name already claimed, prompting again");
        };
        guard.name = Some(name.clone());

        self.framed.send(Reply::NameAccepted).await?;
        self.activity.record(
            SYSTEM_ACTOR,
            &clock_stamp(),
            &format!("{} NAMEACCEPTED", name),
        );

        // Announce the join to everyone already registered. The snapshot
        // is taken before this session's sink exists, so the joiner never
        // sees its own notice.
        let sinks = self.roster.snapshot_sinks();
        fanout::deliver_all(&sinks, &Reply::joined(&name));
        self.activity
            .record(SYSTEM_ACTOR, &clock_stamp(), &format!("{} joined", name));

        let (outgoing_tx, mut outgoing_rx) = mpsc::channel::<Reply>(OUTBOUND_QUEUE_SIZE);
        self.roster.add_sink(self.id, outgoing_tx);
        guard.sink_registered = true;

        info!(name = %name, "Session registered");

        // Phase 2: relay loop.
        loop {
            tokio::select! {
                result = self.framed.next() => {
                    match result {
                        Some(Ok(line)) => match Command::classify(&line) {
                            Command::Quit => {
                                self.quit(&name).await;
                                // Flush anything queued for this session,
                                // including its own disconnected notice.
                                while let Ok(reply) = outgoing_rx.try_recv() {
                                    if self.framed.send(reply).await.is_err() {
                                        break;
                                    }
                                }
                                break;
                            }
                            Command::Users => self.list_users(&name, &line).await?,
                            Command::Help => self.send_help(&name, &line).await?,
                            Command::Chat(text) => self.relay_chat(&name, &text),
                        },
                        Some(Err(e)) => {
                            debug!(error = %e, "Read error");
                            break;
                        }
                        None => {
                            // A vanished client gets no disconnected
                            // notice; only /QUIT announces departure.
                            info!("Client disconnected");
                            break;
                        }
                    }
                }
                Some(reply) = outgoing_rx.recv() => {
                    if let Err(e) = self.framed.send(reply).await {
                        warn!(error = %e, "Write error");
                        break;
                    }
                }
            }
        }

        drop(guard);
        info!("Session closed");
        Ok(())
    }

    /// Acknowledge a `/QUIT` and announce the departure to every session,
    /// the quitter included.
    async fn quit(&mut self, name: &str) {
        if let Err(e) = self.framed.send(Reply::Quit).await {
            debug!(error = %e, "Write error sending quit ack");
        }
        let stamp = clock_stamp();
        self.activity
            .record(SYSTEM_ACTOR, &stamp, &format!("{} disconnected", name));
        let sinks = self.roster.snapshot_sinks();
        fanout::deliver_all(&sinks, &Reply::disconnected(name, &stamp));
    }

    /// Answer `/USER` with the listing of other connected names. Sent
    /// directly to the requesting socket only.
    async fn list_users(&mut self, name: &str, line: &str) -> anyhow::Result<()> {
        self.activity.record(name, &clock_stamp(), line);
        self.framed.send(Reply::roster_header()).await?;
        for user in self.roster.snapshot_names(Some(name)) {
            self.framed.send(Reply::roster_entry(&user)).await?;
        }
        Ok(())
    }

    /// Answer `/HELP` with the command summary.
    async fn send_help(&mut self, name: &str, line: &str) -> anyhow::Result<()> {
        self.activity.record(name, &clock_stamp(), line);
        let [first, second] = Reply::help();
        self.framed.send(first).await?;
        self.framed.send(second).await?;
        Ok(())
    }

    /// Relay chat text to every registered session, the sender included.
    fn relay_chat(&self, name: &str, text: &str) {
        let stamp = clock_stamp();
        let reply = Reply::chat(name, &stamp, text);
        for (id, sink) in self.roster.snapshot_sinks() {
            // The transcript records one line per delivery, not one per
            // message; readers of the log count on the duplication.
            self.activity.record(name, &stamp, text);
            fanout::deliver(id, &sink, &reply);
        }
    }
}
