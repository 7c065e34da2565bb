//! Data models for `roster`

pub mod student;

pub use student::{Student, StudentUpdate, MAX_AGE};
