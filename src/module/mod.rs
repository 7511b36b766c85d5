// file: src/module/mod.rs
// version: 1.0.0
// guid: e6f7081a-2a3b-44c5-d6d7-e8f90a1b2c34

//! Registry of custom system modules
//!
//! The registry is a single YAML document mapping module name to its record.
//! Every mutation loads the whole document and rewrites it; there is no
//! locking, so callers must serialize mutations themselves.

pub mod record;
pub mod registry;

pub use record::{LogType, ModuleRecord, ModuleSpec, OneOrMany};
pub use registry::ModuleRegistry;
