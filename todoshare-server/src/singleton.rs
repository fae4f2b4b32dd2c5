//! Only one server may own a session file at a time.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// A lock guard that releases the lock when dropped
pub struct LockGuard {
    _file: File,
}

fn lock_path(session_file: &Path) -> PathBuf {
    let mut name = session_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "session".into());
    name.push(".lock");
    session_file.with_file_name(name)
}

/// Acquire an exclusive lock next to the session file, failing if another instance holds it
pub fn acquire_lock(session_file: &Path) -> Result<LockGuard> {
    let path = lock_path(session_file);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let file = File::create(&path).context("Failed to create lock file")?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another todoshare-server instance is using {}.\n\
            If you believe this is an error, remove: {}",
            session_file.display(),
            path.display()
        )
    })?;

    Ok(LockGuard { _file: file })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_lock_on_same_session_fails() {
        let dir = tempfile::tempdir().unwrap();
        let session = dir.path().join("session.toml");

        let _first = acquire_lock(&session).unwrap();
        assert!(acquire_lock(&session).is_err());
        assert!(dir.path().join("session.toml.lock").exists());
    }
}
