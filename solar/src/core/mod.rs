//! Deterministic, pure logic shared by the store, the CLI and the API.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod seed;
pub mod summary;
pub mod types;
pub mod validation;
pub mod view;
