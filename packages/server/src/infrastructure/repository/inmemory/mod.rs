pub mod roster;

pub use roster::InMemoryRoster;
