//! UseCase layer: the protocol engine and the operations it dispatches to.

pub mod broadcaster;
pub mod disconnect_participant;
pub mod error;
pub mod login;
pub mod protocol;
pub mod send_message;

pub use broadcaster::Broadcaster;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::LoginError;
pub use login::LoginUseCase;
pub use protocol::{Flow, ProtocolEngine};
pub use send_message::SendMessageUseCase;
