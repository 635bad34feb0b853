use coco::{
    cli::run,
    errors::{CocoError, ConfigError, GitError},
    utils::print_error,
};

fn main() {
    if let Err(error) = run() {
        print_error("git-coco failed", &error.to_string(), suggestion(&error));
        std::process::exit(1);
    }
}

fn suggestion(error: &CocoError) -> &'static str {
    match error {
        CocoError::Git(GitError::RepositoryNotFound) => {
            "Please ensure you're in a Git repository."
        }
        CocoError::Config(ConfigError::ConfigAlreadyExists { .. }) => {
            "Edit the existing configuration file instead."
        }
        CocoError::Config(_) => "Check your git-coco configuration, or run `git-coco init`.",
        CocoError::Authors(_) => {
            "Set `authors_file` in your configuration to a readable authors file."
        }
        _ => "Run again with --verbose for more details.",
    }
}
