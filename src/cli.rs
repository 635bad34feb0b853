use std::{io, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use inquire::{Confirm, Text};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{
    authors::AuthorDirectory,
    compose::prepare_commit_msg_file,
    config::{AUTHORS_FILE_NAME, COAUTHORS_MSG_FILE_NAME, Config, Settings},
    errors::Result,
    git::{GitBranch, get_hooks_path, get_top_level_path},
    hook,
    prompt::TerminalPrompter,
    utils::{format_list, print_success, print_warning},
};

#[derive(Subcommand)]
enum Commands {
    /// Prepare commit message subcommand
    /// Adds co-authors and the issue reference to the commit message file.
    /// Called by the installed `prepare-commit-msg` hook.
    #[command(name = "prepare-msg")]
    PrepareMsg {
        /// Commit message file passed by git
        #[arg(value_name = "COMMIT_MSG_FILE")]
        commit_msg_file: PathBuf,

        /// Source of the commit message (message, template, merge, squash or commit)
        #[arg(value_name = "SOURCE")]
        source: Option<String>,

        /// Commit SHA-1, given when amending
        #[arg(value_name = "SHA")]
        sha: Option<String>,
    },

    /// Install subcommand
    /// Installs git-coco as the `prepare-commit-msg` hook of the current repository.
    #[command(short_flag = 'i')]
    Install {
        /// Replace an existing `prepare-commit-msg` hook
        #[arg(short = 'f', long = "force", default_value_t = false)]
        force: bool,
    },

    /// Uninstall subcommand
    /// Removes the hook installed by git-coco.
    Uninstall,

    /// Authors subcommand
    /// Lists the co-authors known by their initials.
    #[command(short_flag = 'a')]
    Authors,

    /// Init subcommand
    /// Creates the global configuration file. Missing values are asked for.
    Init {
        /// Email domain of the co-authors
        #[arg(long)]
        domain: Option<String>,

        /// Prefix of issue URLs
        #[arg(long = "issue-url-base")]
        issue_url_base: Option<String>,

        /// Whether to add issue references to commit messages
        #[arg(long = "use-issue")]
        use_issue: Option<bool>,
    },

    /// Completion subcommand
    /// Prints the shell completion script.
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser)]
#[command(about = "Git hook that adds to your commit messages:\n\
\t- Co-authors, from their initials.\n\
\t- The issue reference, from the branch name.")]
#[command(help_template = "{about}\n\nUSAGE:\n{usage}\n\n{all-args}\n")]
#[command(name = "git-coco", version)]
pub struct Cli {
    /// Commands
    #[command(subcommand)]
    command: Commands,

    /// Verbose
    /// Prints debug information about the operation.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    /// Configuration file read on top of the global and repository ones.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// # `init_tracing`
/// Sends log events to stderr. `RUST_LOG` takes precedence over `verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .try_init();
}

/// # `load_settings`
/// Loads the settings for the repository in the current directory, if any.
fn load_settings(config: &Config, explicit: Option<&PathBuf>) -> Result<Settings> {
    let repo_root = get_top_level_path().ok();
    debug!(?repo_root, "loading configuration");

    config.load_settings(repo_root.as_deref(), explicit.map(PathBuf::as_path))
}

/// # `run`
/// Runs the program.
///
/// ## Errors
/// Returns an error if the command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::new()?;

    match cli.command {
        Commands::PrepareMsg {
            commit_msg_file,
            source,
            sha,
        } => {
            debug!(?source, ?sha, file = %commit_msg_file.display(), "prepare-commit-msg");

            let settings = load_settings(&config, cli.config.as_ref())?;
            prepare_commit_msg_file(
                &commit_msg_file,
                source.as_deref(),
                &settings,
                &TerminalPrompter::default(),
                &GitBranch,
            )?;
        }
        Commands::Install { force } => {
            let path = hook::install(&get_hooks_path()?, force)?;
            print_success("Hook installed", &path.display().to_string());
        }
        Commands::Uninstall => {
            let path = hook::uninstall(&get_hooks_path()?)?;
            print_success("Hook removed", &path.display().to_string());
        }
        Commands::Authors => {
            let settings = load_settings(&config, cli.config.as_ref())?;
            let directory = AuthorDirectory::load(&settings.authors_file)?;

            if directory.is_empty() {
                print_warning(
                    "No authors found",
                    &format!("Add `INITIALS,Name,email` lines to {}", settings.authors_file.display()),
                );
            } else {
                let entries: Vec<String> = directory
                    .iter()
                    .map(|(initials, author)| {
                        format!("{initials}: {} <{}>", author.name, author.email(&settings.domain))
                    })
                    .collect();

                println!("{}", format_list(&entries));
            }
        }
        Commands::Init {
            domain,
            issue_url_base,
            use_issue,
        } => {
            let settings = init_settings(&config, domain, issue_url_base, use_issue)?;
            let path = config.create_config_file(&settings)?;
            print_success("Configuration created", &path.display().to_string());
        }
        Commands::Completion { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "git-coco", &mut io::stdout());
        }
    }

    Ok(())
}

/// # `init_settings`
/// Builds the settings written by `init`, asking for the values not given.
fn init_settings(
    config: &Config,
    domain: Option<String>,
    issue_url_base: Option<String>,
    use_issue: Option<bool>,
) -> Result<Settings> {
    let domain = match domain {
        Some(domain) => domain,
        None => Text::new("Email domain of your co-authors:").prompt()?,
    };

    let use_issue_in_msg = match use_issue {
        Some(use_issue) => use_issue,
        None => Confirm::new("Add issue references to commit messages?")
            .with_default(false)
            .prompt()?,
    };

    let issue_url_base = match issue_url_base {
        Some(issue_url_base) => issue_url_base,
        None if use_issue_in_msg => Text::new("Issue URL base (the number is appended):")
            .with_placeholder("https://tracker.example.com/issues/")
            .prompt()?,
        None => String::new(),
    };

    let folder = config.get_config_folder_path();

    Ok(Settings {
        domain,
        use_issue_in_msg,
        issue_url_base,
        authors_file: folder.join(AUTHORS_FILE_NAME),
        coauthors_git_msg_file: folder.join(COAUTHORS_MSG_FILE_NAME),
        ..Settings::default()
    })
}
