//! Client command classification.
//!
//! Registered clients send plain text lines. A small set of slash commands
//! is recognized by case-insensitive prefix match, everything else is chat.

/// One line received from a registered client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/QUIT`: disconnect from the relay.
    Quit,
    /// `/USER`: list the other connected users.
    Users,
    /// `/HELP`: describe the available commands.
    Help,
    /// Anything else: chat text relayed to every session.
    Chat(String),
}

impl Command {
    /// Classify one inbound line.
    ///
    /// Prefixes are checked in order `/QUIT`, `/USER`, `/HELP`, so a line
    /// like `/quitter bye` still quits. A line that matches none of them is
    /// chat, including unrecognized slash commands.
    pub fn classify(line: &str) -> Self {
        let upper = line.to_uppercase();
        if upper.starts_with("/QUIT") {
            Command::Quit
        } else if upper.starts_with("/USER") {
            Command::Users
        } else if upper.starts_with("/HELP") {
            Command::Help
        } else {
            Command::Chat(line.to_owned())
        }
    }

    /// Whether this command closes the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Command::Quit)
    }
}
