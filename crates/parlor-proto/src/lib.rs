//! # parlor-proto
//!
//! Wire protocol for the parlord chat relay: the client command grammar,
//! the server reply lines with their exact legacy payload formats, and
//! tokio codecs for the newline-delimited transport.
//!
//! ## Features
//!
//! - Client line classification (`/QUIT`, `/USER`, `/HELP`, chat)
//! - Server reply construction and parsing (`SUBMITNAME`, `NAMEACCEPTED`,
//!   `QUIT`, `MESSAGE <payload>`)
//! - `HH:MM` wall-clock stamps and transcript day banners
//! - Optional tokio codec integration (enabled by default)

#![deny(clippy::all)]
#![warn(missing_docs)]

//! ## Quick Start
//!
//! ### Building server lines
//!
//! ```rust
//! use parlor_proto::Reply;
//!
//! let chat = Reply::chat("alice", "14:03", "hello there");
//! assert_eq!(chat.to_string(), "MESSAGE alice (14:03) : hello there");
//!
//! let joined = Reply::joined("alice");
//! assert_eq!(joined.to_string(), "MESSAGE        alice joined");
//! ```
//!
//! ### Classifying client lines
//!
//! ```rust
//! use parlor_proto::Command;
//!
//! assert_eq!(Command::classify("/quit"), Command::Quit);
//! assert_eq!(Command::classify("/USERS?"), Command::Users);
//! assert_eq!(
//!     Command::classify("good morning"),
//!     Command::Chat("good morning".to_string())
//! );
//! ```

pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
#[cfg(feature = "tokio")]
pub mod relay;
pub mod reply;
pub mod stamp;

pub use self::command::Command;
pub use self::error::{ProtocolError, ReplyParseError};
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_LINE_LEN};
#[cfg(feature = "tokio")]
pub use self::relay::RelayCodec;
pub use self::reply::{Reply, NOTICE_GUTTER};
pub use self::stamp::{clock_stamp, date_banner};
