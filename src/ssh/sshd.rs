// file: src/ssh/sshd.rs
// version: 1.0.0
// guid: 2b3c4d5e-6e7f-4809-1a2b-b2c3d4e5f607

//! SSH daemon configuration inspection

use crate::error::AdminError;
use crate::Result;
use regex::Regex;
use std::path::Path;
use tokio::fs;
use tracing::warn;

/// Whether the daemon configuration lets root log in.
///
/// Only `no` and `forced-commands-only` deny; any other value or a missing
/// directive allows, as sshd defaults to `yes`.
pub fn root_login_permitted(sshd_config: &str) -> Result<bool> {
    let re = Regex::new(r"(?m)^ *PermitRootLogin +(no|forced-commands-only) *$")
        .map_err(|e| AdminError::config(format!("Invalid regex pattern: {}", e)))?;

    Ok(!re.is_match(sshd_config))
}

/// Read the daemon configuration and report whether root may log in
pub async fn read_root_login_permitted(path: &Path) -> Result<bool> {
    match fs::read_to_string(path).await {
        Ok(content) => root_login_permitted(&content),
        Err(e) => {
            warn!("Unable to read {}: {}", path.display(), e);
            Ok(true)
        }
    }
}
