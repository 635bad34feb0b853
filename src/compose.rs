//! Commit Message Composition
//!
//! Glues the co-authors and issue fragments onto the message git hands to the
//! `prepare-commit-msg` hook.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    authors::AuthorDirectory,
    config::Settings,
    errors::Result,
    git::branch::BranchSource,
    message::{IssueFragment, MessageFragment, VerbatimFragment, coauthors::format_coauthors},
    prompt::Prompter,
};

const COAUTHORS_PROMPT: &str = "Enter co-author(s) initials:";

/// Hook sources for which the message is left untouched: git generated it,
/// or it is reused from an existing commit.
pub const SKIPPED_SOURCES: [&str; 3] = ["merge", "squash", "commit"];

/// Where the co-authors block of the message comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoauthorSource {
    /// A precomputed message file, used verbatim.
    Autosuggest(PathBuf),
    /// Initials typed by the user.
    Interactive,
}

impl CoauthorSource {
    /// Prefers the precomputed message file when it exists.
    #[must_use]
    pub fn select(settings: &Settings) -> Self {
        if settings.coauthors_git_msg_file.is_file() {
            Self::Autosuggest(settings.coauthors_git_msg_file.clone())
        } else {
            Self::Interactive
        }
    }
}

/// Produces the co-authors fragment from the selected source.
///
/// # Errors
/// * If the autosuggest file or the authors file cannot be read
/// * If the prompt fails
pub fn coauthors_fragment(
    settings: &Settings,
    prompter: &dyn Prompter,
) -> Result<Box<dyn MessageFragment>> {
    match CoauthorSource::select(settings) {
        CoauthorSource::Autosuggest(path) => {
            debug!(path = %path.display(), "using autosuggested co-authors message");
            Ok(Box::new(VerbatimFragment::new(fs::read_to_string(path)?)))
        }
        CoauthorSource::Interactive => {
            let help = format!(
                "Comma separated 2 letter initials, e.g. `ts, ck`. Authors are listed in {}",
                settings.authors_file.display()
            );
            let raw_initials = prompter.ask(COAUTHORS_PROMPT, &help)?;
            let directory = AuthorDirectory::load(&settings.authors_file)?;

            Ok(Box::new(format_coauthors(
                &raw_initials,
                &directory,
                &settings.domain,
                settings.notice_delay(),
            )))
        }
    }
}

/// Inserts the rendered fragments after the message body.
///
/// The body keeps exactly one line break, so the leading newlines of each
/// fragment become blank lines. Git's comment block (from the first line
/// starting with `#`) stays at the end so it is still stripped by git.
#[must_use]
pub fn compose_message(base: &str, fragments: &[Box<dyn MessageFragment>]) -> String {
    let comment_start = comment_block_start(base);
    let (body, comments) = base.split_at(comment_start);

    let mut message = body.trim_end_matches('\n').to_string();
    if !message.is_empty() {
        message.push('\n');
    }

    for fragment in fragments {
        message.push_str(&fragment.render());
    }

    if !comments.is_empty() && !message.ends_with('\n') {
        message.push('\n');
    }
    message.push_str(comments);

    message
}

/// Byte offset of the first comment line, or the end of `message`.
fn comment_block_start(message: &str) -> usize {
    let mut offset = 0;

    for line in message.split_inclusive('\n') {
        if line.starts_with('#') {
            return offset;
        }
        offset += line.len();
    }

    message.len()
}

/// Adds the co-authors and issue trailers to the message file git passed to
/// the `prepare-commit-msg` hook.
///
/// Returns `false` when the message was left untouched because of `source`.
///
/// # Errors
/// * If the message file cannot be read or written
/// * If building one of the fragments fails
pub fn prepare_commit_msg_file(
    path: &Path,
    source: Option<&str>,
    settings: &Settings,
    prompter: &dyn Prompter,
    branches: &dyn BranchSource,
) -> Result<bool> {
    if let Some(source) = source
        && SKIPPED_SOURCES.contains(&source)
    {
        debug!(source, "commit message generated by git, skipping");
        return Ok(false);
    }

    let base = fs::read_to_string(path)?;

    let fragments: Vec<Box<dyn MessageFragment>> = vec![
        Box::new(IssueFragment::resolve(settings, branches, prompter)?),
        coauthors_fragment(settings, prompter)?,
    ];

    fs::write(path, compose_message(&base, &fragments))?;

    Ok(true)
}
