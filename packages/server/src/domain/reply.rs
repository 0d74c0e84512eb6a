//! Server-to-client lines.
//!
//! Every line the server writes is produced here so the wire text lives in
//! one place. Lines carry no trailing newline; the codec appends it.

use std::fmt;

use super::value_object::Nickname;

/// Banner sent once on connect.
pub const GREETING: &str = "Welcome to gochat-server 1.0";

/// One outbound protocol line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply<'a> {
    Greeting,
    Welcome(&'a Nickname),
    Joined(&'a Nickname),
    Left(&'a Nickname),
    Chat { from: &'a Nickname, text: &'a str },
    Bye,
    MustLogin,
    LineTooLong(usize),
    InvalidUtf8,
    ShuttingDown,
}

impl fmt::Display for Reply<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Greeting => f.write_str(GREETING),
            Reply::Welcome(nickname) => write!(f, "Welcome {}", nickname),
            Reply::Joined(nickname) => write!(f, "{} joined the chat", nickname),
            Reply::Left(nickname) => write!(f, "{} left the chat", nickname),
            Reply::Chat { from, text } => write!(f, "{}: {}", from, text),
            Reply::Bye => f.write_str("Bye!"),
            Reply::MustLogin => f.write_str("You must first login by: NICK [nickname]"),
            Reply::LineTooLong(max) => write!(f, "line too long (max {} bytes)", max),
            Reply::InvalidUtf8 => f.write_str("line is not valid UTF-8"),
            Reply::ShuttingDown => f.write_str("Server is shutting down"),
        }
    }
}
