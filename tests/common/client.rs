//! Test relay client.
//!
//! A line-oriented client for integration testing that can send text and
//! assert on received server replies.

use std::time::Duration;

use parlor_proto::Reply;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// A test relay client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let (read_half, write_half) = stream.into_split();

        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        })
    }

    /// Send one line of text.
    pub async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single reply from the server.
    pub async fn recv(&mut self) -> anyhow::Result<Reply> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a reply with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Reply> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("Connection closed by server");
        }

        line.parse::<Reply>()
            .map_err(|e| anyhow::anyhow!("Parse error: {} (line: {:?})", e, line))
    }

    /// Receive replies until the given predicate returns true.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<Reply>>
    where
        F: FnMut(&Reply) -> bool,
    {
        let mut replies = Vec::new();
        loop {
            let reply = self.recv().await?;
            let done = predicate(&reply);
            replies.push(reply);
            if done {
                break;
            }
        }
        Ok(replies)
    }

    /// Run the name handshake: wait for `SUBMITNAME`, answer with `name`,
    /// expect `NAMEACCEPTED`.
    pub async fn register(&mut self, name: &str) -> anyhow::Result<()> {
        match self.recv().await? {
            Reply::SubmitName => {}
            other => anyhow::bail!("Expected SUBMITNAME, got: {}", other),
        }
        self.send_line(name).await?;
        match self.recv().await? {
            Reply::NameAccepted => Ok(()),
            Reply::SubmitName => anyhow::bail!("Name {:?} was rejected", name),
            other => anyhow::bail!("Expected NAMEACCEPTED, got: {}", other),
        }
    }

    /// Send `/quit` and wait for the `QUIT` acknowledgement.
    pub async fn quit(&mut self) -> anyhow::Result<()> {
        self.send_line("/quit").await?;
        let replies = self.recv_until(|r| matches!(r, Reply::Quit)).await?;
        if replies.iter().any(|r| matches!(r, Reply::Quit)) {
            Ok(())
        } else {
            anyhow::bail!("No QUIT acknowledgement received")
        }
    }
}
