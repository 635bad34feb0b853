use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the git-coco application
#[derive(Error, Debug)]
pub enum CocoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Authors file error: {0}")]
    Authors(#[from] AuthorsError),

    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error("Operation cancelled by user")]
    UserCancelled,
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error while accessing config: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Configuration file not found at {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration file already exists at {} - edit it directly", path.display())]
    ConfigAlreadyExists { path: PathBuf },

    #[error("Could not determine home directory - please set HOME environment variable")]
    HomeDirNotFound,
}

/// Git-related errors
#[derive(Error, Debug)]
pub enum GitError {
    #[error("IO error during git operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Not in a git repository - please run this command from within a git repository")]
    RepositoryNotFound,

    #[error("Git command failed: {command}\nOutput: {output}")]
    CommandFailed { command: String, output: String },
}

/// Errors raised while reading the authors file
#[derive(Error, Debug)]
pub enum AuthorsError {
    #[error("Could not read authors file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Hook installation errors
#[derive(Error, Debug)]
pub enum HookError {
    #[error("A prepare-commit-msg hook already exists at {} - use --force to replace it", path.display())]
    AlreadyInstalled { path: PathBuf },

    #[error("No prepare-commit-msg hook installed at {}", path.display())]
    NotInstalled { path: PathBuf },

    #[error("The hook at {} was not installed by git-coco - refusing to remove it", path.display())]
    ForeignHook { path: PathBuf },
}

/// Type alias for Result using `CocoError`
pub type Result<T> = std::result::Result<T, CocoError>;
