// file: src/module/registry.rs
// version: 1.0.0
// guid: 081a2b3c-4c5d-46e7-f8f9-0a1b2c3d4e56

//! Module registry persistence and mutation

use super::record::{pad_log_types, ModuleRecord, ModuleSpec};
use crate::error::AdminError;
use crate::messages;
use crate::system::ServiceManager;
use crate::Result;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, warn};

/// Registry contents, keyed by module name
pub type ModuleMap = BTreeMap<String, ModuleRecord>;

pub struct ModuleRegistry {
    path: PathBuf,
    services: Arc<dyn ServiceManager>,
}

impl ModuleRegistry {
    pub fn new(path: impl Into<PathBuf>, services: Arc<dyn ServiceManager>) -> Self {
        Self {
            path: path.into(),
            services,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register a module, replacing any previous record with the same name
    pub async fn add(&self, spec: ModuleSpec) -> Result<()> {
        let name = spec.name.clone();
        let mut document = self.load_document().await;
        let mut record = ModuleRecord::default();

        if let Some(log) = spec.log {
            let log = log.into_vec();
            let log_type = pad_log_types(log.len(), spec.log_type.into_vec()).ok_or_else(|| {
                AdminError::ModuleAddFailed {
                    module: name.clone(),
                }
            })?;
            record.log = Some(log);
            record.log_type = Some(log_type);
        }

        match spec.description.filter(|d| !d.is_empty()) {
            Some(description) => record.description = Some(description),
            None => record.description = self.unit_description(&name).await?,
        }

        record.need_lock = spec.need_lock;
        record.test_status = spec.test_status.filter(|c| !c.is_empty());
        record.test_conf = spec.test_conf.filter(|c| !c.is_empty());
        if !spec.needs_exposed_ports.is_empty() {
            record.needs_exposed_ports = Some(spec.needs_exposed_ports);
        }

        let value = serde_yaml::to_value(&record).map_err(|e| {
            warn!("Failed to serialize module {}: {}", name, e);
            AdminError::ModuleAddFailed {
                module: name.clone(),
            }
        })?;
        document.insert(Value::String(name.clone()), value);

        // Detailed cause is logged by save()
        self.save(&document)
            .await
            .map_err(|_| AdminError::ModuleAddFailed {
                module: name.clone(),
            })?;

        messages::notice_success("module_added", &[("module", name.as_str())]);
        Ok(())
    }

    /// Unregister a module
    pub async fn remove(&self, name: &str) -> Result<()> {
        let mut document = self.load_document().await;

        if document.remove(name).is_none() {
            return Err(AdminError::ModuleUnknown {
                module: name.to_string(),
            });
        }

        self.save(&document)
            .await
            .map_err(|_| AdminError::ModuleRemoveFailed {
                module: name.to_string(),
            })?;

        messages::notice_success("module_removed", &[("module", name)]);
        Ok(())
    }

    /// All registered modules
    pub async fn list(&self) -> ModuleMap {
        self.load().await
    }

    /// Record of a single module
    pub async fn get(&self, name: &str) -> Result<ModuleRecord> {
        self.load()
            .await
            .remove(name)
            .ok_or_else(|| AdminError::ModuleUnknown {
                module: name.to_string(),
            })
    }

    async fn unit_description(&self, name: &str) -> Result<Option<String>> {
        let description = self.services.unit_description(name).await.map_err(|e| {
            warn!("Failed to query the description of {}: {}", name, e);
            AdminError::ModuleAddFailed {
                module: name.to_string(),
            }
        })?;

        // systemd reports the unit file name when no Description= is set
        if description == format!("{}.service", name) || description.is_empty() {
            messages::notice_warning("module_description_missing", &[("module", name)]);
            return Ok(None);
        }

        Ok(Some(description))
    }

    /// Read the registry as typed records. Entries that do not match the
    /// record schema are skipped here but stay untouched in the file.
    async fn load(&self) -> ModuleMap {
        self.load_document()
            .await
            .into_iter()
            .filter_map(|(key, value)| {
                let name = key.as_str()?.to_string();
                match serde_yaml::from_value::<ModuleRecord>(value) {
                    Ok(record) => Some((name, record)),
                    Err(e) => {
                        warn!("Ignoring malformed module entry {}: {}", name, e);
                        None
                    }
                }
            })
            .collect()
    }

    /// Read the registry document. Missing or unparsable files read as
    /// empty, and null entries left by older tools are dropped.
    async fn load_document(&self) -> Mapping {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                debug!("Module registry {} not readable: {}", self.path.display(), e);
                return Mapping::new();
            }
        };

        let document: Mapping = match serde_yaml::from_str(&content) {
            Ok(document) => document,
            Err(e) => {
                debug!("Module registry {} not parsable: {}", self.path.display(), e);
                return Mapping::new();
            }
        };

        document
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .collect()
    }

    async fn save(&self, document: &Mapping) -> Result<()> {
        let result = async {
            let content = serde_yaml::to_string(document)?;
            fs::write(&self.path, content).await?;
            Ok::<(), AdminError>(())
        }
        .await;

        if let Err(e) = &result {
            warn!(
                "Error while saving system modules to {}: {:?}",
                self.path.display(),
                e
            );
        }

        result
    }
}
