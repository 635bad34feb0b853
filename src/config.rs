//! Configuration Management Module for git-coco
//!
//! This module handles all configuration-related functionality, including
//! - Locating the global configuration folder
//! - Layering defaults, configuration files and environment variables
//! - Writing a fresh configuration file
//!
//! # Configuration Structure
//!
//! Settings are read, lowest priority first, from
//! - built-in defaults
//! - the global TOML file at `~/.config/git-coco/config.toml`
//! - a `.git-coco.toml` file at the top of the repository
//! - a file given with `--config`
//! - `GIT_COCO_*` environment variables (e.g. `GIT_COCO_DOMAIN`)

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::{ConfigError, Result},
    git::repository::resolve_against,
};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const REPO_CONFIG_FILE_NAME: &str = ".git-coco.toml";
pub const AUTHORS_FILE_NAME: &str = "authors.txt";
pub const COAUTHORS_MSG_FILE_NAME: &str = "coauthors_msg.txt";
pub const ENV_PREFIX: &str = "GIT_COCO";

const DEFAULT_NOTICE_DELAY_MS: u64 = 2000;

/// The options git-coco reads from its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Email domain appended to each author's email local part.
    pub domain: String,
    /// Whether to add an issue reference to commit messages.
    pub use_issue_in_msg: bool,
    /// Prefix of issue URLs; the issue number is appended to it.
    pub issue_url_base: String,
    /// Authors file mapping initials to names and emails.
    pub authors_file: PathBuf,
    /// Precomputed co-authors message used instead of prompting, if present.
    pub coauthors_git_msg_file: PathBuf,
    /// How long the unknown-initials notice stays on screen.
    pub notice_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            domain: String::new(),
            use_issue_in_msg: false,
            issue_url_base: String::new(),
            authors_file: PathBuf::from(AUTHORS_FILE_NAME),
            coauthors_git_msg_file: PathBuf::from(COAUTHORS_MSG_FILE_NAME),
            notice_delay_ms: DEFAULT_NOTICE_DELAY_MS,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn notice_delay(&self) -> Duration {
        Duration::from_millis(self.notice_delay_ms)
    }
}

/// Main configuration struct that handles all config operations
pub struct Config {
    root: PathBuf,
}

impl Config {
    /// Creates a new Config instance rooted at the user's home directory
    ///
    /// # Errors
    /// * When the home directory cannot be determined
    pub fn new() -> Result<Self> {
        let root = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Config { root })
    }

    /// Creates a new Config instance with a custom root path
    ///
    /// # Arguments
    /// * `root` - The custom root path
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Config { root: root.into() }
    }

    /// Returns the path to the configuration folder.
    #[must_use]
    pub fn get_config_folder_path(&self) -> PathBuf {
        self.root.join(".config").join("git-coco")
    }

    /// Returns the path to the global configuration file
    #[must_use]
    pub fn get_config_file_path(&self) -> PathBuf {
        self.get_config_folder_path().join(CONFIG_FILE_NAME)
    }

    /// Loads the layered settings.
    ///
    /// # Arguments
    /// * `repo_root` - Top level of the current repository, if any. Its
    ///   `.git-coco.toml` is read and relative paths are resolved against it.
    /// * `explicit` - A configuration file that must exist.
    ///
    /// # Errors
    /// * If a configuration file is malformed
    /// * If `explicit` does not exist
    pub fn load_settings(
        &self,
        repo_root: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Settings> {
        if let Some(path) = explicit
            && !path.exists()
        {
            return Err(ConfigError::ConfigNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let mut settings = self
            .build_settings(repo_root, explicit)
            .map_err(ConfigError::from)?;

        if let Some(repo_root) = repo_root {
            settings.authors_file = resolve_against(repo_root, &settings.authors_file);
            settings.coauthors_git_msg_file =
                resolve_against(repo_root, &settings.coauthors_git_msg_file);
        }

        debug!(?settings, "configuration loaded");

        Ok(settings)
    }

    fn build_settings(
        &self,
        repo_root: Option<&Path>,
        explicit: Option<&Path>,
    ) -> std::result::Result<Settings, config::ConfigError> {
        let folder = self.get_config_folder_path();

        let mut builder = config::Config::builder()
            .set_default("domain", "")?
            .set_default("use_issue_in_msg", false)?
            .set_default("issue_url_base", "")?
            .set_default(
                "authors_file",
                folder.join(AUTHORS_FILE_NAME).to_string_lossy().to_string(),
            )?
            .set_default(
                "coauthors_git_msg_file",
                folder
                    .join(COAUTHORS_MSG_FILE_NAME)
                    .to_string_lossy()
                    .to_string(),
            )?
            .set_default("notice_delay_ms", DEFAULT_NOTICE_DELAY_MS)?
            .add_source(
                File::from(self.get_config_file_path().as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );

        if let Some(repo_root) = repo_root {
            builder = builder.add_source(
                File::from(repo_root.join(REPO_CONFIG_FILE_NAME).as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Creates the global configuration file
    ///
    /// # Arguments
    /// * `settings` - The settings to write
    ///
    /// # Errors
    /// * If an I/O error occurs while creating the configuration file
    /// * If the file already exists
    pub fn create_config_file(&self, settings: &Settings) -> Result<PathBuf> {
        let config_folder = self.get_config_folder_path();

        if !config_folder.exists() {
            fs::create_dir_all(&config_folder).map_err(ConfigError::from)?;
        }

        let config_file = self.get_config_file_path();

        if config_file.exists() {
            return Err(ConfigError::ConfigAlreadyExists { path: config_file }.into());
        }

        let content = toml::to_string_pretty(settings).map_err(ConfigError::from)?;
        fs::write(&config_file, content).map_err(ConfigError::from)?;

        Ok(config_file)
    }
}
