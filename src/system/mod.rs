// file: src/system/mod.rs
// version: 1.0.0
// guid: 6e7f8091-a2b3-4c4d-9e5f-60718293a4b5

//! Local system collaborators
//!
//! The registry and SSH managers reach the host only through the traits in
//! this module, which keeps them testable against in-memory fakes.

pub mod accounts;
pub mod command;
pub mod fs;
pub mod nscd;
pub mod systemd;

pub use accounts::{AccountDatabase, SystemAccounts, UnixAccount};
pub use nscd::{NameServiceCache, NscdCache};
pub use systemd::{ServiceManager, SystemctlServiceManager};

/// Check if running as root
pub fn is_root() -> bool {
    unsafe { libc::getuid() == 0 }
}
