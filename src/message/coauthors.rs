//! Co-authors trailer
//!
//! Turns a comma-separated list of initials such as `"ts, ck"` into git
//! `Co-authored-by:` trailers, using the authors directory to resolve each
//! initial to a name and email address.

use std::{thread, time::Duration};

use tracing::debug;

use crate::{authors::AuthorDirectory, message::MessageFragment, utils::print_info};

/// Git trailer key recognised by GitHub and GitLab for co-authors.
pub const COAUTHOR_TRAILER: &str = "Co-authored-by";

/// The initials requested by the user, split into known and unknown ones.
///
/// Initials are trimmed, upper-cased and deduplicated. Both lists keep the
/// order in which the initials were first typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoauthorSelection {
    valid: Vec<String>,
    invalid: Vec<String>,
}

impl CoauthorSelection {
    /// Parses `raw` and partitions the initials against `directory`.
    #[must_use]
    pub fn parse(raw: &str, directory: &AuthorDirectory) -> Self {
        let mut selection = Self::default();

        let candidates = raw
            .split(',')
            .map(|token| token.trim().to_uppercase())
            .filter(|token| !token.is_empty());

        for initials in candidates {
            if selection.valid.contains(&initials) || selection.invalid.contains(&initials) {
                continue;
            }

            if directory.contains(&initials) {
                selection.valid.push(initials);
            } else {
                selection.invalid.push(initials);
            }
        }

        selection
    }

    /// Initials present in the authors directory.
    #[must_use]
    pub fn valid(&self) -> &[String] {
        &self.valid
    }

    /// Initials absent from the authors directory.
    #[must_use]
    pub fn invalid(&self) -> &[String] {
        &self.invalid
    }

    /// The notice shown for unknown initials, if there are any.
    #[must_use]
    pub fn invalid_notice(&self) -> Option<String> {
        if self.invalid.is_empty() {
            return None;
        }

        Some(format!(
            "These initials are incorrect: {}",
            self.invalid.join(", ")
        ))
    }
}

/// The `Co-authored-by:` block of a commit message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoauthorsFragment {
    lines: Vec<String>,
}

impl CoauthorsFragment {
    /// Builds one trailer line per valid initial of `selection`.
    #[must_use]
    pub fn compose(
        selection: &CoauthorSelection,
        directory: &AuthorDirectory,
        domain: &str,
    ) -> Self {
        let lines = selection
            .valid()
            .iter()
            .filter_map(|initials| directory.get(initials))
            .map(|author| {
                format!(
                    "{COAUTHOR_TRAILER}: {} <{}>",
                    author.name,
                    author.email(domain)
                )
            })
            .collect();

        Self { lines }
    }

    /// The trailer lines, without surrounding blank lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl MessageFragment for CoauthorsFragment {
    fn render(&self) -> String {
        if self.lines.is_empty() {
            return "\n".to_string();
        }

        // git only picks up trailers separated from the body by blank lines
        format!("\n\n{}\n\n", self.lines.join("\n"))
    }
}

/// Resolves the initials typed by the user into a co-authors fragment.
///
/// Unknown initials never stop the commit: they are reported, then dropped.
/// `notice_delay` keeps the notice on screen before the next prompt.
#[must_use]
pub fn format_coauthors(
    raw_initials: &str,
    directory: &AuthorDirectory,
    domain: &str,
    notice_delay: Duration,
) -> CoauthorsFragment {
    let selection = CoauthorSelection::parse(raw_initials, directory);

    if let Some(notice) = selection.invalid_notice() {
        print_info(&notice, "Please check and add them manually.");

        if !notice_delay.is_zero() {
            thread::sleep(notice_delay);
        }
    }

    debug!(coauthors = ?selection.valid(), "resolved co-authors");

    CoauthorsFragment::compose(&selection, directory, domain)
}
