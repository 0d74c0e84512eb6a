//! Roster repository implementations.

pub mod inmemory;

pub use inmemory::InMemoryRoster;
