// file: src/logging/mod.rs
// version: 1.0.0
// guid: 6f708192-a2b3-4c4d-5e6f-f60718293a41

//! Logging system for the host administration agent

pub mod logger;

pub use logger::{init_json_logger, init_logger};
