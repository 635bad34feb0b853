//! Branch Operations
//!
//! Reading the currently checked out branch, which may carry the issue number
//! of the commit.

use std::process::Command;

#[cfg(test)]
use mockall::automock;

use crate::errors::{GitError, Result};

/// What HEAD points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchState {
    /// HEAD points to a branch, possibly without commits yet.
    Named(String),
    /// HEAD points directly to a commit.
    Detached,
}

/// Source of the repository's branch state.
#[cfg_attr(test, automock)]
pub trait BranchSource {
    /// Returns the current branch state.
    ///
    /// # Errors
    /// * If the branch state cannot be determined
    fn branch_state(&self) -> Result<BranchState>;
}

/// Reads the branch state by running `git` in the current directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitBranch;

impl BranchSource for GitBranch {
    fn branch_state(&self) -> Result<BranchState> {
        get_branch_state()
    }
}

/// Gets the current branch state.
///
/// `git symbolic-ref` succeeds with the branch name when HEAD is attached and
/// exits with status 1 when HEAD is detached. Unlike `git rev-parse`, it also
/// works on a branch without commits.
///
/// # Errors
///
/// Returns an error if:
/// - Not currently in a git repository
/// - The git command fails to execute
///
/// # Examples
///
/// ```no_run
/// use coco::git::branch::{BranchState, get_branch_state};
///
/// match get_branch_state()? {
///     BranchState::Named(branch) => println!("On branch {branch}"),
///     BranchState::Detached => println!("HEAD is detached"),
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn get_branch_state() -> Result<BranchState> {
    let output = Command::new("git")
        .args(["symbolic-ref", "--quiet", "--short", "HEAD"])
        .output()
        .map_err(GitError::IoError)?;

    if output.status.success() {
        let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
        return Ok(BranchState::Named(branch));
    }

    if output.status.code() == Some(1) && output.stderr.is_empty() {
        return Ok(BranchState::Detached);
    }

    Err(GitError::CommandFailed {
        command: "git symbolic-ref --quiet --short HEAD".to_string(),
        output: String::from_utf8_lossy(&output.stderr).to_string(),
    }
    .into())
}
