//! Utilities shared by the GoChat server and client binaries.

pub mod logger;
pub mod time;
