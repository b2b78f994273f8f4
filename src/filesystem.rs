//! Filesystem helpers for the plugins directory: a write-probe run before
//! any mutation, idempotent creation, and recursive removal.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The closest path at or above `path` that exists.
pub fn nearest_existing_ancestor(path: &Path) -> Option<&Path> {
    path.ancestors().find(|p| p.exists())
}

/// Checks that the plugins root can be written to.
///
/// A temporary file is created (and removed again) in the root itself when
/// it exists, otherwise in its nearest existing ancestor, which is where
/// creating the root would happen.
pub fn check_writable(plugins_root: &Path) -> Result<()> {
    let probe_dir = nearest_existing_ancestor(plugins_root).ok_or_else(|| Error::Permission {
        path: plugins_root.to_path_buf(),
    })?;

    tempfile::Builder::new()
        .prefix(".muxplug-probe-")
        .tempfile_in(probe_dir)
        .map(drop)
        .map_err(|_| Error::Permission {
            path: probe_dir.to_path_buf(),
        })
}

/// Creates `path` and its parents; succeeds if it already exists.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Recursively removes `path`.
pub fn remove_dir(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|source| Error::Remove {
        path: path.to_path_buf(),
        source,
    })
}

/// Joins a plugin directory name onto the plugins root.
pub fn plugin_path(plugins_root: &Path, dir_name: &str) -> PathBuf {
    plugins_root.join(dir_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_nearest_existing_ancestor() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("a/b/c");
        assert_eq!(nearest_existing_ancestor(&missing), Some(temp.path()));
        assert_eq!(nearest_existing_ancestor(temp.path()), Some(temp.path()));
    }

    #[test]
    fn test_check_writable_leaves_nothing_behind() {
        let temp = TempDir::new().unwrap();
        check_writable(temp.path()).unwrap();
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_check_writable_missing_root_probes_parent() {
        let temp = TempDir::new().unwrap();
        check_writable(&temp.path().join("plugins")).unwrap();
        assert!(!temp.path().join("plugins").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_check_writable_read_only_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let root = temp.path().join("plugins");
        fs::create_dir(&root).unwrap();
        fs::set_permissions(&root, fs::Permissions::from_mode(0o555)).unwrap();

        let result = check_writable(&root);

        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
        // Root bypasses permission bits, so only assert when the probe is enforced.
        if let Err(err) = result {
            assert!(matches!(err, Error::Permission { .. }));
        }
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("plugins");
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_remove_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("tmux-yank/scripts");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("copy.sh"), "#!/bin/sh").unwrap();

        remove_dir(&temp.path().join("tmux-yank")).unwrap();
        assert!(!temp.path().join("tmux-yank").exists());
    }

    #[test]
    fn test_remove_missing_dir_errors() {
        let temp = TempDir::new().unwrap();
        let err = remove_dir(&temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Remove { .. }));
    }
}
