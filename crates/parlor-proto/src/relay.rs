//! Relay codec for tokio.
//!
//! Wraps [`LineCodec`]: inbound client lines are decoded to trimmed
//! strings, outbound [`Reply`] values are serialized one per line.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error;
use crate::line::LineCodec;
use crate::reply::Reply;

/// Tokio codec for one relay session.
///
/// The decoder yields client lines with the terminator removed; command
/// classification and name handling operate on clean text. The encoder
/// writes exactly one frame per [`Reply`].
pub struct RelayCodec {
    inner: LineCodec,
}

impl RelayCodec {
    /// Create a new codec with the default length limit.
    pub fn new() -> Self {
        Self {
            inner: LineCodec::new(),
        }
    }

    /// Create a new codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            inner: LineCodec::with_max_len(max_len),
        }
    }

    /// Truncate outgoing data at the first line ending so a reply can
    /// never smuggle extra frames onto the wire.
    fn sanitize(mut data: String) -> String {
        if let Some(pos) = data.find(['\r', '\n']) {
            data.truncate(pos);
        }
        data
    }
}

impl Default for RelayCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for RelayCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        Ok(self
            .inner
            .decode(src)?
            .map(|line| line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

impl Encoder<Reply> for RelayCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, reply: Reply, dst: &mut BytesMut) -> error::Result<()> {
        let mut line = Self::sanitize(reply.to_string());
        line.push('\n');
        self.inner.encode(line, dst)
    }
}
