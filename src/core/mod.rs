//! Core module: the record store and everything the shells call into

pub mod config;
pub mod export;
pub mod models;
pub mod stats;
pub mod store;

/// Returns the current version of the `roster` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
