// file: src/ssh/manager.rs
// version: 1.0.0
// guid: 5e6f7081-91a2-4b3c-4d5e-e5f607182930

//! SSH access toggling and key management

use super::authorized_keys::{self, AuthorizedKeyEntry};
use super::user::{SshUserProfile, UserResolver};
use crate::config::AdminConfig;
use crate::directory::{Attributes, DirectoryService};
use crate::error::AdminError;
use crate::messages;
use crate::system::{fs as sysfs, AccountDatabase, NameServiceCache};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

/// Keys of one account, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyList {
    pub keys: Vec<AuthorizedKeyEntry>,
}

pub struct SshAccessManager {
    resolver: UserResolver,
    accounts: Arc<dyn AccountDatabase>,
    directory: Arc<dyn DirectoryService>,
    cache: Arc<dyn NameServiceCache>,
    config: Arc<AdminConfig>,
}

impl SshAccessManager {
    pub fn new(
        accounts: Arc<dyn AccountDatabase>,
        directory: Arc<dyn DirectoryService>,
        cache: Arc<dyn NameServiceCache>,
        config: Arc<AdminConfig>,
    ) -> Self {
        let resolver = UserResolver::new(accounts.clone(), directory.clone(), config.clone());
        Self {
            resolver,
            accounts,
            directory,
            cache,
            config,
        }
    }

    /// Profile of an account, or `UserUnknown`
    pub async fn user(&self, username: &str) -> Result<SshUserProfile> {
        self.resolver
            .resolve(username)
            .await?
            .ok_or_else(|| AdminError::user_unknown(username))
    }

    /// Give the account a usable login shell
    pub async fn allow(&self, username: &str) -> Result<()> {
        let shell = self.config.ssh.allowed_shell.clone();
        self.set_login_shell(username, &shell).await?;
        messages::notice_success("ssh_allowed", &[("user", username)]);
        Ok(())
    }

    /// Give the account an unusable login shell
    pub async fn disallow(&self, username: &str) -> Result<()> {
        let shell = self.config.ssh.disallowed_shell.clone();
        self.set_login_shell(username, &shell).await?;
        messages::notice_success("ssh_disallowed", &[("user", username)]);
        Ok(())
    }

    async fn set_login_shell(&self, username: &str, shell: &str) -> Result<()> {
        self.user(username).await?;

        let dn = format!("uid={},{}", username, self.config.directory.users_ou);
        let mut changes = Attributes::new();
        changes.insert("loginShell".to_string(), vec![shell.to_string()]);
        self.directory.update(&dn, &changes).await?;
        info!("Login shell of {} set to {}", username, shell);

        // PAM keeps serving the old shell until the passwd cache is dropped
        self.cache.invalidate("passwd").await;
        Ok(())
    }

    /// Keys listed in the account's `authorized_keys`
    pub async fn list_keys(&self, username: &str) -> Result<KeyList> {
        let user = self.user(username).await?;
        let path = user.authorized_keys_path();

        if !fs::try_exists(&path).await? {
            debug!("{} does not exist", path.display());
            return Ok(KeyList::default());
        }

        let content = fs::read_to_string(&path).await?;
        Ok(KeyList {
            keys: authorized_keys::parse(&content),
        })
    }

    /// Append a key, creating `~/.ssh/authorized_keys` with owner-only
    /// permissions first if needed
    pub async fn add_key(&self, username: &str, key: &str, comment: Option<&str>) -> Result<()> {
        let user = self.user(username).await?;
        let path = user.authorized_keys_path();

        if !fs::try_exists(&path).await? {
            let uid = self.owner_uid(&user).await?;
            if let Some(ssh_dir) = path.parent() {
                sysfs::ensure_dir_owned(ssh_dir, uid).await?;
            }
            sysfs::create_private_file(&path, uid).await?;
        }

        let content = fs::read_to_string(&path).await?;
        fs::write(&path, authorized_keys::append(&content, key, comment)).await?;

        messages::notice_success("ssh_key_added", &[("user", username)]);
        Ok(())
    }

    /// Remove every occurrence of a key. The comment naming it stays.
    pub async fn remove_key(&self, username: &str, key: &str) -> Result<()> {
        let user = self.user(username).await?;
        let path = user.authorized_keys_path();

        if !fs::try_exists(&path).await? {
            return Err(AdminError::file_not_found(path.display().to_string()));
        }

        let content = fs::read_to_string(&path).await?;
        let updated = authorized_keys::remove(&content, key).ok_or_else(|| AdminError::KeyNotFound {
            key: key.trim().to_string(),
        })?;
        fs::write(&path, updated).await?;

        messages::notice_success("ssh_key_removed", &[("user", username)]);
        Ok(())
    }

    async fn owner_uid(&self, user: &SshUserProfile) -> Result<u32> {
        if let Some(uid) = user.uid {
            return Ok(uid);
        }

        // Directory records without uidNumber still resolve through NSS
        self.accounts
            .lookup(&user.username)
            .await?
            .map(|account| account.uid)
            .ok_or_else(|| {
                AdminError::system(format!("No numeric uid known for {}", user.username))
            })
    }
}
