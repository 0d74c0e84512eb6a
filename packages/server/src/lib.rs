//! Line-based TCP chat server library.
//!
//! Clients log in with `NICK <name>` and every chat line they send is
//! relayed to all other logged-in clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;

#[cfg(test)]
mod test_support;
