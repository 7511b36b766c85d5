// file: src/config/mod.rs
// version: 1.0.0
// guid: 1a6b2c3d-7e8f-4091-a2b3-c4d5e6f70812

//! Configuration module for the host administration agent
//!
//! Every well-known system path and external command is carried here so the
//! registry and SSH managers never touch hard-coded locations.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub paths: PathsConfig,
    pub ssh: SshConfig,
    pub directory: DirectoryConfig,
    pub commands: CommandsConfig,
    pub logging: LoggingConfig,
}

/// Files managed or inspected by the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// YAML registry of custom system modules
    pub modules_file: PathBuf,
    /// SSH daemon configuration (read-only)
    pub sshd_config: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            modules_file: PathBuf::from("/etc/yunohost/modules.yml"),
            sshd_config: PathBuf::from("/etc/ssh/sshd_config"),
        }
    }
}

/// Login shells used to toggle SSH access
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshConfig {
    pub allowed_shell: String,
    pub disallowed_shell: String,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            allowed_shell: "/bin/bash".to_string(),
            disallowed_shell: "/bin/false".to_string(),
        }
    }
}

/// Directory service location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub uri: String,
    pub base_dn: String,
    pub users_ou: String,
    /// Extra authentication arguments passed to the LDAP tools
    pub bind_args: Vec<String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            uri: "ldapi:///".to_string(),
            base_dn: "dc=yunohost,dc=org".to_string(),
            users_ou: "ou=users".to_string(),
            bind_args: vec!["-Y".to_string(), "EXTERNAL".to_string(), "-Q".to_string()],
        }
    }
}

impl DirectoryConfig {
    /// Search base for user accounts
    pub fn users_base(&self) -> String {
        format!("{},{}", self.users_ou, self.base_dn)
    }
}

/// External command names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    pub systemctl: String,
    pub nscd: String,
    pub ldapsearch: String,
    pub ldapmodify: String,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            systemctl: "systemctl".to_string(),
            nscd: "nscd".to_string(),
            ldapsearch: "ldapsearch".to_string(),
            ldapmodify: "ldapmodify".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AdminConfig {
    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        for (name, shell) in [
            ("ssh.allowed_shell", &self.ssh.allowed_shell),
            ("ssh.disallowed_shell", &self.ssh.disallowed_shell),
        ] {
            if !shell.starts_with('/') {
                return Err(crate::error::AdminError::config(format!(
                    "{} must be an absolute path, got '{}'",
                    name, shell
                )));
            }
        }

        if self.ssh.allowed_shell == self.ssh.disallowed_shell {
            return Err(crate::error::AdminError::config(
                "ssh.allowed_shell and ssh.disallowed_shell must differ",
            ));
        }

        if self.directory.base_dn.trim().is_empty() {
            return Err(crate::error::AdminError::config(
                "directory.base_dn cannot be empty",
            ));
        }

        if self.paths.modules_file.as_os_str().is_empty() {
            return Err(crate::error::AdminError::config(
                "paths.modules_file cannot be empty",
            ));
        }

        Ok(())
    }
}
