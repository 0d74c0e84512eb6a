//! Infrastructure layer: concrete implementations of the domain interfaces.

pub mod codec;
pub mod message_pusher;
pub mod repository;
