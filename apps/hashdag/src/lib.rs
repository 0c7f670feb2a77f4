//! # hashdag
//!
//! Library half of the hashdag binary: the CLI, file I/O, DOT rendering and
//! settings loading, exposed so integration tests can drive them directly.

pub mod cli;
pub mod files;
pub mod render;
pub mod settings;
