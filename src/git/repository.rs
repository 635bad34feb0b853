//! Repository Operations
//!
//! Repository detection and path resolution.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::errors::{GitError, Result};

/// Runs `git rev-parse` with `args` and returns its trimmed output as a path.
fn rev_parse_path(args: &[&str]) -> Result<PathBuf> {
    let output = Command::new("git")
        .arg("rev-parse")
        .args(args)
        .output()
        .map_err(GitError::IoError)?;

    if !output.status.success() {
        return Err(GitError::RepositoryNotFound.into());
    }

    Ok(PathBuf::from(
        String::from_utf8_lossy(&output.stdout).trim(),
    ))
}

/// Retrieves the top-level directory of the working tree.
///
/// # Errors
/// * If not in a git repository or the git command fails
pub fn get_top_level_path() -> Result<PathBuf> {
    rev_parse_path(&["--show-toplevel"])
}

/// Retrieves the directory git runs hooks from, honouring `core.hooksPath`.
///
/// # Errors
/// * If not in a git repository or the git command fails
pub fn get_hooks_path() -> Result<PathBuf> {
    rev_parse_path(&["--git-path", "hooks"])
}

/// Resolves `path` against `base` unless it is already absolute.
#[must_use]
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
