// file: tests/common/mod.rs
// version: 1.0.0
// guid: d6e7f809-192a-43b4-c5d6-6d7e8f901a28

//! In-memory collaborators shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use host_admin_agent::{
    config::AdminConfig,
    directory::{Attributes, DirectoryEntry, DirectoryService},
    ssh::SshAccessManager,
    system::{AccountDatabase, NameServiceCache, UnixAccount},
    Result,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub fn current_uid() -> u32 {
    nix::unistd::getuid().as_raw()
}

#[derive(Default)]
pub struct FakeAccounts {
    accounts: HashMap<String, UnixAccount>,
}

impl FakeAccounts {
    pub fn with(mut self, name: &str, shell: &str, home: &Path) -> Self {
        self.accounts.insert(
            name.to_string(),
            UnixAccount {
                name: name.to_string(),
                uid: current_uid(),
                gid: 0,
                shell: shell.to_string(),
                home: home.display().to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl AccountDatabase for FakeAccounts {
    async fn lookup(&self, name: &str) -> Result<Option<UnixAccount>> {
        Ok(self.accounts.get(name).cloned())
    }
}

#[derive(Default)]
pub struct FakeDirectory {
    pub entries: Mutex<Vec<DirectoryEntry>>,
    pub searches: Mutex<Vec<(String, String)>>,
    pub updates: Mutex<Vec<(String, Attributes)>>,
}

impl FakeDirectory {
    pub fn add_person(&self, uid: &str, home: &Path, shell: &str) {
        let mut entry = DirectoryEntry {
            dn: format!("uid={},ou=users,dc=yunohost,dc=org", uid),
            ..DirectoryEntry::default()
        };
        for (name, value) in [
            ("uid", uid.to_string()),
            ("cn", format!("{} Test", uid)),
            ("mail", format!("{}@example.org", uid)),
            ("loginShell", shell.to_string()),
            ("homeDirectory", home.display().to_string()),
            ("uidNumber", current_uid().to_string()),
        ] {
            entry.attributes.insert(name.to_string(), vec![value]);
        }
        self.entries.lock().unwrap().push(entry);
    }

    /// A person record carrying only the given attributes
    pub fn add_entry(&self, uid: &str, attributes: &[(&str, &str)]) {
        let mut entry = DirectoryEntry {
            dn: format!("uid={},ou=users,dc=yunohost,dc=org", uid),
            ..DirectoryEntry::default()
        };
        entry.attributes.insert("uid".to_string(), vec![uid.to_string()]);
        for (name, value) in attributes {
            entry
                .attributes
                .insert(name.to_string(), vec![value.to_string()]);
        }
        self.entries.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl DirectoryService for FakeDirectory {
    async fn update(&self, dn: &str, changes: &Attributes) -> Result<()> {
        self.updates
            .lock()
            .unwrap()
            .push((dn.to_string(), changes.clone()));
        Ok(())
    }

    async fn search(&self, base_dn: &str, filter: &str, _attrs: &[&str]) -> Result<Vec<DirectoryEntry>> {
        self.searches
            .lock()
            .unwrap()
            .push((base_dn.to_string(), filter.to_string()));

        let entries = self.entries.lock().unwrap();
        Ok(entries
            .iter()
            .filter(|e| {
                e.first("uid")
                    .map(|uid| filter.contains(&format!("(uid={}))", uid)))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct RecordingCache {
    pub invalidated: Mutex<Vec<String>>,
}

#[async_trait]
impl NameServiceCache for RecordingCache {
    async fn invalidate(&self, database: &str) {
        self.invalidated.lock().unwrap().push(database.to_string());
    }
}

/// A host with `root`, `admin` (shell disabled) and directory user `alice`,
/// all living under a temporary directory
pub struct TestHost {
    pub temp: TempDir,
    pub directory: Arc<FakeDirectory>,
    pub cache: Arc<RecordingCache>,
    pub manager: SshAccessManager,
}

impl TestHost {
    pub fn new(sshd_config: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let sshd_path = temp.path().join("sshd_config");
        std::fs::write(&sshd_path, sshd_config).unwrap();

        let accounts = FakeAccounts::default()
            .with("root", "/bin/bash", &temp.path().join("root"))
            .with("admin", "/bin/false", &temp.path().join("home").join("admin"));

        let directory = Arc::new(FakeDirectory::default());
        directory.add_person("alice", &temp.path().join("home").join("alice"), "/bin/false");

        let cache = Arc::new(RecordingCache::default());

        let mut config = AdminConfig::default();
        config.paths.sshd_config = sshd_path;
        config.paths.modules_file = temp.path().join("modules.yml");

        let manager = SshAccessManager::new(
            Arc::new(accounts),
            directory.clone(),
            cache.clone(),
            Arc::new(config),
        );

        Self {
            temp,
            directory,
            cache,
            manager,
        }
    }

    pub fn home(&self, user: &str) -> PathBuf {
        match user {
            "root" => self.temp.path().join("root"),
            other => self.temp.path().join("home").join(other),
        }
    }

    pub fn authorized_keys(&self, user: &str) -> PathBuf {
        self.home(user).join(".ssh").join("authorized_keys")
    }
}
