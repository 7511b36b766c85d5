// file: src/system/nscd.rs
// version: 1.0.0
// guid: 8091a2b3-c4d5-4e6f-9071-8293a4b5c6d7

use super::command;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Name-service cache invalidation. Best effort: implementations swallow
/// failures so a stale cache never fails the surrounding operation.
#[async_trait]
pub trait NameServiceCache: Send + Sync {
    async fn invalidate(&self, database: &str);
}

pub struct NscdCache {
    nscd: String,
}

impl NscdCache {
    pub fn new(nscd: impl Into<String>) -> Self {
        Self { nscd: nscd.into() }
    }
}

#[async_trait]
impl NameServiceCache for NscdCache {
    async fn invalidate(&self, database: &str) {
        if !command::command_exists(&self.nscd) {
            debug!("{} not found in PATH, skipping cache invalidation", self.nscd);
            return;
        }

        let args = vec!["-i".to_string(), database.to_string()];
        if let Err(e) = command::run(&self.nscd, &args, None).await {
            warn!("Failed to invalidate {} cache: {}", database, e);
        }
    }
}
