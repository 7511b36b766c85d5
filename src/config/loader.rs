// file: src/config/loader.rs
// version: 1.0.0
// guid: 5d9e0f1a-2b3c-4d5e-8f60-718293a4b5c6

//! Configuration file loading and environment variable substitution

use super::AdminConfig;
use crate::error::AdminError;
use crate::Result;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// System-wide configuration file, used when no user file exists
pub const SYSTEM_CONFIG_PATH: &str = "/etc/host-admin-agent/config.toml";

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
    env_vars: HashMap<String, String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            env_vars: std::env::vars().collect(),
        }
    }

    /// Create a loader that only sees the given variables
    pub fn with_env(env_vars: HashMap<String, String>) -> Self {
        Self { env_vars }
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, the user configuration and
    /// then the system configuration are tried; built-in defaults apply when
    /// neither is present. Environment overrides are applied last.
    pub fn load(&self, explicit: Option<&Path>) -> Result<AdminConfig> {
        let mut config = match explicit {
            Some(path) => self.load_file(path)?,
            None => match self.default_candidates().into_iter().find(|p| p.exists()) {
                Some(path) => self.load_file(&path)?,
                None => {
                    debug!("No configuration file found, using defaults");
                    AdminConfig::default()
                }
            },
        };

        self.apply_env_overrides(&mut config);
        Self::expand_paths(&mut config);
        config.validate()?;

        debug!("Final configuration: {:#?}", config);
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<AdminConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            AdminError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let expanded = self.expand_env_vars(&content)?;
        toml::from_str(&expanded).map_err(|e| {
            AdminError::config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn default_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("host-admin-agent").join("config.toml"));
        }
        candidates.push(PathBuf::from(SYSTEM_CONFIG_PATH));
        candidates
    }

    /// Expand environment variables in configuration content
    fn expand_env_vars(&self, content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| AdminError::config(format!("Invalid regex pattern: {}", e)))?;

        let mut result = content.to_string();
        let mut missing_vars = Vec::new();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];

            if let Some(value) = self.env_vars.get(var_name) {
                result = result.replace(placeholder, value);
            } else {
                missing_vars.push(var_name.to_string());
            }
        }

        if !missing_vars.is_empty() {
            return Err(AdminError::config(format!(
                "Missing environment variables: {}",
                missing_vars.join(", ")
            )));
        }

        Ok(result)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&self, config: &mut AdminConfig) {
        if let Some(path) = self.env_vars.get("HOST_ADMIN_MODULES_FILE") {
            config.paths.modules_file = PathBuf::from(path);
        }

        if let Some(path) = self.env_vars.get("HOST_ADMIN_SSHD_CONFIG") {
            config.paths.sshd_config = PathBuf::from(path);
        }

        if let Some(level) = self.env_vars.get("HOST_ADMIN_LOG_LEVEL") {
            config.logging.level = level.clone();
        }
    }

    fn expand_paths(config: &mut AdminConfig) {
        for path in [&mut config.paths.modules_file, &mut config.paths.sshd_config] {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            *path = PathBuf::from(expanded);
        }
    }

    /// Set environment variable for substitution
    pub fn set_env_var(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
