//! Git Operations Module
//!
//! The repository state git-coco reads: the current branch and the paths of
//! the repository it runs in.

pub mod branch;
pub mod repository;

pub use branch::GitBranch;
pub use repository::{get_hooks_path, get_top_level_path};
