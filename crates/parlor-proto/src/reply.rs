//! Server reply lines.
//!
//! Everything the relay sends is one of four line shapes: the handshake
//! prompts `SUBMITNAME` and `NAMEACCEPTED`, the `QUIT` acknowledgement, and
//! `MESSAGE <payload>` for all relayed text. The payload formats here are
//! the wire contract and must not drift; deployed clients match on them
//! byte for byte.

use std::fmt;
use std::str::FromStr;

use crate::error::ReplyParseError;

/// Payload gutter used by server notices (join, listing, help).
///
/// Notices align with the text column of `<name> (<HH:MM>) : ` chat lines
/// by starting the payload with seven spaces.
pub const NOTICE_GUTTER: &str = "       ";

/// One server-to-client line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Prompt the client for a screen name.
    SubmitName,
    /// Acknowledge a successfully claimed screen name.
    NameAccepted,
    /// Acknowledge a `/QUIT`; the session closes after this line.
    Quit,
    /// A relayed payload: chat text, presence notices, listings, help.
    Message(String),
}

impl Reply {
    /// Chat line as relayed to every session: `<name> (<stamp>) : <text>`.
    pub fn chat(name: &str, stamp: &str, text: &str) -> Self {
        Reply::Message(format!("{} ({}) : {}", name, stamp, text))
    }

    /// Presence notice sent when a session disconnects via `/QUIT`.
    pub fn disconnected(name: &str, stamp: &str) -> Self {
        Reply::Message(format!("{} ({}) disconnected", name, stamp))
    }

    /// Presence notice sent when a session completes the handshake.
    pub fn joined(name: &str) -> Self {
        Reply::Message(format!("{}{} joined", NOTICE_GUTTER, name))
    }

    /// Header line of the `/USER` listing.
    pub fn roster_header() -> Self {
        Reply::Message(format!("{}list of users:", NOTICE_GUTTER))
    }

    /// One entry of the `/USER` listing.
    pub fn roster_entry(name: &str) -> Self {
        Reply::Message(format!("{}{}", NOTICE_GUTTER, name))
    }

    /// The two `/HELP` lines, in send order.
    pub fn help() -> [Self; 2] {
        [
            Reply::Message(format!("{}/user => list of connected users.", NOTICE_GUTTER)),
            Reply::Message(format!(
                "{}/quit => disconnect from Chat-Server.",
                NOTICE_GUTTER
            )),
        ]
    }

    /// The `MESSAGE` payload, if this is a payload-carrying reply.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Reply::Message(payload) => Some(payload),
            _ => None,
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::SubmitName => f.write_str("SUBMITNAME"),
            Reply::NameAccepted => f.write_str("NAMEACCEPTED"),
            Reply::Quit => f.write_str("QUIT"),
            Reply::Message(payload) => write!(f, "MESSAGE {}", payload),
        }
    }
}

impl FromStr for Reply {
    type Err = ReplyParseError;

    /// Parse one server line. Trailing line endings are ignored; the
    /// keywords themselves are matched exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Err(ReplyParseError::Empty);
        }
        match line {
            "SUBMITNAME" => Ok(Reply::SubmitName),
            "NAMEACCEPTED" => Ok(Reply::NameAccepted),
            "QUIT" => Ok(Reply::Quit),
            _ => match line.strip_prefix("MESSAGE ") {
                Some(payload) => Ok(Reply::Message(payload.to_owned())),
                None => Err(ReplyParseError::UnknownReply(line.to_owned())),
            },
        }
    }
}
