//! CLI command implementations.

pub mod common;
pub mod connections;
pub mod export;
pub mod version;
