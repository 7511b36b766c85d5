// file: src/ssh/mod.rs
// version: 1.0.0
// guid: 1a2b3c4d-5d6e-47f8-0910-a1b2c3d4e5f6

//! SSH access control for local accounts
//!
//! Covers login-shell toggling and per-user `authorized_keys` editing. Key
//! files are rewritten whole on every change, without locking.

pub mod authorized_keys;
pub mod manager;
pub mod sshd;
pub mod user;

pub use authorized_keys::AuthorizedKeyEntry;
pub use manager::{KeyList, SshAccessManager};
pub use user::{AccountClass, SshUserProfile, UserResolver};
