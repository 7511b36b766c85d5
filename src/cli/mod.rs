// file: src/cli/mod.rs
// version: 1.0.0
// guid: 92a3b4c5-d5e6-4f70-8192-293a4b5c6d74

//! Command line interface for the host administration agent

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::*;
