//! In-memory registry of solar-installation assets.
//!
//! The crate is split the same way every consumer uses it:
//!
//! - **[`core`]**: Pure, deterministic logic (asset types, the list view
//!   pipeline, validation, dashboard summaries, seed generation). No I/O,
//!   fully testable in isolation.
//! - **[`io`]**: The asynchronous record store with simulated latency and
//!   failure injection, plus TOML configuration.
//!
//! The `solar` binary and the `solar-api` server both construct one
//! [`io::store::AssetStore`] and feed its snapshots through
//! [`core::view::compute_visible_page`].

pub mod core;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
