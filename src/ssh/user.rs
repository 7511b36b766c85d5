// file: src/ssh/user.rs
// version: 1.0.0
// guid: 4d5e6f70-8091-4a2b-3c4d-d4e5f6071829

//! Account resolution for SSH management

use super::sshd;
use crate::config::AdminConfig;
use crate::directory::{escape_filter_value, DirectoryEntry, DirectoryService};
use crate::error::AdminError;
use crate::system::{AccountDatabase, UnixAccount};
use crate::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Attributes fetched for directory accounts
const DIRECTORY_ATTRS: [&str; 6] = ["uid", "cn", "mail", "loginShell", "homeDirectory", "uidNumber"];

/// How an account is looked up, decided by the username alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountClass {
    /// Local `root`; SSH access follows `PermitRootLogin`
    Root,
    /// Local `admin`; SSH access follows its login shell
    Admin,
    /// Any other name, held by the directory service
    Directory,
}

impl AccountClass {
    pub fn of(username: &str) -> Self {
        match username {
            "root" => AccountClass::Root,
            "admin" => AccountClass::Admin,
            _ => AccountClass::Directory,
        }
    }
}

/// Synthesized view of an account, never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SshUserProfile {
    pub username: String,
    pub fullname: String,
    pub mail: String,
    pub shell: String,
    pub home_path: String,
    pub ssh_allowed: bool,
    pub class: AccountClass,
    /// Numeric owner for files created in the home directory
    #[serde(skip)]
    pub uid: Option<u32>,
}

impl SshUserProfile {
    pub fn authorized_keys_path(&self) -> PathBuf {
        PathBuf::from(&self.home_path).join(".ssh").join("authorized_keys")
    }

    fn from_unix(account: UnixAccount, class: AccountClass, ssh_allowed: bool) -> Self {
        Self {
            username: account.name,
            fullname: String::new(),
            mail: String::new(),
            shell: account.shell,
            home_path: account.home,
            ssh_allowed,
            class,
            uid: Some(account.uid),
        }
    }

    /// Key files live under the home directory, so a record without an
    /// absolute `homeDirectory` is rejected.
    fn from_directory(
        username: &str,
        entry: &DirectoryEntry,
        disallowed_shell: &str,
    ) -> Result<Self> {
        let home_path = match entry.first("homeDirectory").map(str::trim) {
            Some(home) if Path::new(home).is_absolute() => home.to_string(),
            Some(home) => {
                return Err(AdminError::directory(format!(
                    "{} has a relative homeDirectory '{}'",
                    entry.dn, home
                )))
            }
            None => {
                return Err(AdminError::directory(format!(
                    "{} has no homeDirectory",
                    entry.dn
                )))
            }
        };

        let shell = entry.first("loginShell").unwrap_or_default().to_string();
        Ok(Self {
            username: entry.first("uid").unwrap_or(username).to_string(),
            fullname: entry.first("cn").unwrap_or_default().to_string(),
            mail: entry.first("mail").unwrap_or_default().to_string(),
            ssh_allowed: shell.trim() != disallowed_shell,
            shell,
            home_path,
            class: AccountClass::Directory,
            uid: entry.first("uidNumber").and_then(|n| n.trim().parse().ok()),
        })
    }
}

pub struct UserResolver {
    accounts: Arc<dyn AccountDatabase>,
    directory: Arc<dyn DirectoryService>,
    config: Arc<AdminConfig>,
}

impl UserResolver {
    pub fn new(
        accounts: Arc<dyn AccountDatabase>,
        directory: Arc<dyn DirectoryService>,
        config: Arc<AdminConfig>,
    ) -> Self {
        Self {
            accounts,
            directory,
            config,
        }
    }

    /// Resolve a username to its profile, or `None` if no such account exists.
    ///
    /// # Panics
    ///
    /// Panics if the directory holds more than one person with this uid.
    pub async fn resolve(&self, username: &str) -> Result<Option<SshUserProfile>> {
        match AccountClass::of(username) {
            AccountClass::Root => {
                let Some(account) = self.accounts.lookup("root").await? else {
                    return Ok(None);
                };
                let allowed = sshd::read_root_login_permitted(&self.config.paths.sshd_config).await?;
                Ok(Some(SshUserProfile::from_unix(account, AccountClass::Root, allowed)))
            }
            AccountClass::Admin => {
                let Some(account) = self.accounts.lookup("admin").await? else {
                    return Ok(None);
                };
                let allowed = account.shell.trim() != self.config.ssh.disallowed_shell;
                Ok(Some(SshUserProfile::from_unix(account, AccountClass::Admin, allowed)))
            }
            AccountClass::Directory => {
                let filter = format!(
                    "(&(objectclass=person)(uid={}))",
                    escape_filter_value(username)
                );
                let entries = self
                    .directory
                    .search(&self.config.directory.users_base(), &filter, &DIRECTORY_ATTRS)
                    .await?;

                assert!(
                    entries.len() <= 1,
                    "directory holds {} accounts with uid {}",
                    entries.len(),
                    username
                );

                entries
                    .first()
                    .map(|entry| {
                        SshUserProfile::from_directory(
                            username,
                            entry,
                            &self.config.ssh.disallowed_shell,
                        )
                    })
                    .transpose()
            }
        }
    }
}
