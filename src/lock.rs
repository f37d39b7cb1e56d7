//! Completion marker stored in the repository's `.git` directory
use std::{
    fs::write,
    path::{Path, PathBuf},
};

use chrono::Local;

use crate::errors::{ToghError, ToghErrorKind};

/// Path of the lock file for a repository
pub(crate) fn lock_path(repo_path: &Path, lock_name: &str) -> PathBuf {
    repo_path.join(".git").join(lock_name)
}

/// Mark a repository as processed by writing the current time to its lock file
/// # Errors
/// Error if the lock file can't be written
pub fn set_lock(repo_path: &Path, lock_name: &str) -> Result<(), ToghError> {
    let path = lock_path(repo_path, lock_name);
    write(&path, Local::now().to_rfc3339()).map_err(|e| {
        ToghError::new(ToghErrorKind::Filesystem)
            .with_text(&format!("Unable to write lock '{}': {e}", path.display()))
    })
}

/// Check whether a repository was already processed
pub fn lock_exists(repo_path: &Path, lock_name: &str) -> bool {
    lock_path(repo_path, lock_name).exists()
}
