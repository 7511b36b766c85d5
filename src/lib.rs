// file: src/lib.rs
// version: 1.0.0
// guid: 8192a3b4-c4d5-4e6f-7081-18293a4b5c63

//! # Host Admin Agent
//!
//! Administration of two pieces of local host state:
//!
//! - the registry of custom system modules (`module`), a YAML document of
//!   service descriptors;
//! - SSH access for local accounts (`ssh`): login-shell toggling and
//!   `authorized_keys` editing.
//!
//! Both rewrite whole files on every change and take no locks. Callers that
//! may run concurrently must serialize access themselves.

pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod messages;
pub mod module;
pub mod ssh;
pub mod system;

pub use error::{AdminError, Result};

/// Version information for the agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
