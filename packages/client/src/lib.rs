//! Line-based TCP chat client.
//!
//! Forwards terminal lines to the server and prints server lines as they
//! arrive.

mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use error::ClientError;
pub use runner::{ClientConfig, run_client};
pub use session::{SessionEnd, run_client_session};
