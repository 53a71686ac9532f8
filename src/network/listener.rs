//! Listener - TCP accept loop that spawns session tasks.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::activity::ActivityLog;
use crate::network::Connection;
use crate::state::{Roster, SessionIdAllocator};

/// Accepts incoming TCP connections and spawns one session task each.
pub struct Listener {
    listener: TcpListener,
    roster: Arc<Roster>,
    activity: Arc<dyn ActivityLog>,
    ids: SessionIdAllocator,
}

impl Listener {
    /// Bind to the configured address. A bind failure is fatal for the
    /// process; everything after this point is per-connection.
    pub async fn bind(
        addr: SocketAddr,
        roster: Arc<Roster>,
        activity: Arc<dyn ActivityLog>,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "Listener bound");
        Ok(Self {
            listener,
            roster,
            activity,
            ids: SessionIdAllocator::new(),
        })
    }

    /// The address actually bound. Differs from the configured one when
    /// the config asked for port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections forever. Accept errors are logged and the loop
    /// keeps going; individual session failures never reach here.
    #[instrument(skip(self), name = "listener")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!(%addr, "Connection accepted");

                    let id = self.ids.next();
                    let roster = Arc::clone(&self.roster);
                    let activity = Arc::clone(&self.activity);

                    tokio::spawn(async move {
                        let connection =
                            Connection::new(id, stream, addr.to_string(), roster, activity);
                        if let Err(e) = connection.run().await {
                            error!(%id, %addr, error = %e, "Connection error");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}
