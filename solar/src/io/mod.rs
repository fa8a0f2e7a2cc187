//! Side-effecting pieces: the simulated remote store and its configuration.

pub mod config;
pub mod store;
