//! Hook Installation
//!
//! Installs git-coco as the repository's `prepare-commit-msg` hook.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::{HookError, Result};

pub const HOOK_NAME: &str = "prepare-commit-msg";

/// Marker line identifying hooks written by git-coco.
const HOOK_MARKER: &str = "# installed by git-coco";

/// Content of the installed hook script.
#[must_use]
pub fn hook_script() -> String {
    format!("#!/bin/sh\n{HOOK_MARKER}\nexec git-coco prepare-msg \"$@\"\n")
}

/// Writes the hook into `hooks_dir` and makes it executable.
///
/// # Errors
/// * `HookError::AlreadyInstalled` if a hook exists and `force` is false
/// * If the hook cannot be written
pub fn install(hooks_dir: &Path, force: bool) -> Result<PathBuf> {
    let path = hooks_dir.join(HOOK_NAME);

    if path.exists() && !force {
        return Err(HookError::AlreadyInstalled { path }.into());
    }

    fs::create_dir_all(hooks_dir)?;
    fs::write(&path, hook_script())?;
    make_executable(&path)?;

    Ok(path)
}

/// Removes the hook from `hooks_dir` if git-coco installed it.
///
/// # Errors
/// * `HookError::NotInstalled` if there is no hook
/// * `HookError::ForeignHook` if the hook was not written by git-coco
pub fn uninstall(hooks_dir: &Path) -> Result<PathBuf> {
    let path = hooks_dir.join(HOOK_NAME);

    if !path.exists() {
        return Err(HookError::NotInstalled { path }.into());
    }

    if !fs::read_to_string(&path)?.contains(HOOK_MARKER) {
        return Err(HookError::ForeignHook { path }.into());
    }

    fs::remove_file(&path)?;

    Ok(path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
