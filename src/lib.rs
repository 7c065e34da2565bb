//! Shared library for `roster`
//! Contains the record store, statistics, CSV export, configuration, and the
//! web shell used by the CLI binary.

pub mod core;
pub mod web;

pub use crate::core::config;
