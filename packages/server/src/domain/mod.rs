//! Domain layer: value objects, the session state machine, the line grammar
//! and the interfaces the use cases depend on.

pub mod command;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod reply;
pub mod repository;
pub mod session;
pub mod value_object;

pub use command::Command;
pub use entity::RosterEntry;
pub use error::{MessagePushError, NicknameError, SessionError};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use message_pusher::MessagePusher;
pub use reply::Reply;
pub use repository::RosterRepository;
pub use session::{Session, SessionState};
pub use value_object::{Nickname, SessionId, Timestamp};
