//! CLI command implementations.

pub mod common;
pub mod expect;
pub mod sample;
pub mod version;
