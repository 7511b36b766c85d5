// file: src/system/accounts.rs
// version: 1.0.0
// guid: 91a2b3c4-d5e6-4f70-8182-93a4b5c6d7e8

use crate::error::AdminError;
use crate::Result;
use async_trait::async_trait;
use nix::unistd::User;

/// Entry from the local account database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnixAccount {
    pub name: String,
    pub uid: u32,
    pub gid: u32,
    pub shell: String,
    pub home: String,
}

#[async_trait]
pub trait AccountDatabase: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<Option<UnixAccount>>;
}

/// Reads the host's passwd database
pub struct SystemAccounts;

#[async_trait]
impl AccountDatabase for SystemAccounts {
    async fn lookup(&self, name: &str) -> Result<Option<UnixAccount>> {
        let user = User::from_name(name)
            .map_err(|e| AdminError::system(format!("Failed to look up account {}: {}", name, e)))?;

        Ok(user.map(|u| UnixAccount {
            name: u.name,
            uid: u.uid.as_raw(),
            gid: u.gid.as_raw(),
            shell: u.shell.to_string_lossy().to_string(),
            home: u.dir.to_string_lossy().to_string(),
        }))
    }
}
