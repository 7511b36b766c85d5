// file: src/system/fs.rs
// version: 1.0.0
// guid: a2b3c4d5-e6f7-4081-9293-a4b5c6d7e8f9

//! Ownership-aware file helpers

use crate::error::AdminError;
use crate::Result;
use nix::unistd::{chown, Uid};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Hand a path over to `uid`, leaving the group unchanged
pub fn chown_to(path: &Path, uid: u32) -> Result<()> {
    chown(path, Some(Uid::from_raw(uid)), None).map_err(|e| {
        AdminError::system(format!("Failed to chown {} to {}: {}", path.display(), uid, e))
    })
}

/// Create a directory (and parents) owned by `uid`
pub async fn ensure_dir_owned(path: &Path, uid: u32) -> Result<()> {
    fs::create_dir_all(path).await?;
    chown_to(path, uid)?;
    debug!("Ensured directory {} owned by {}", path.display(), uid);
    Ok(())
}

/// Create an empty file owned by `uid` with mode 0600
pub async fn create_private_file(path: &Path, uid: u32) -> Result<()> {
    fs::write(path, "").await?;
    chown_to(path, uid)?;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    debug!("Created private file {}", path.display());
    Ok(())
}
