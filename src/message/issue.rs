//! Issue reference trailer
//!
//! Branches named like `feature_issue12345` carry the issue number in their
//! last `_`-separated segment. When the branch does not, the user is asked
//! for one.

use tracing::debug;

use crate::{
    config::Settings,
    errors::Result,
    git::branch::{BranchSource, BranchState},
    message::MessageFragment,
    prompt::Prompter,
};

const ISSUE_MARKER: &str = "issue";
const ISSUE_PROMPT: &str = "Enter issue number (optional):";

/// An issue number and the tracker URL built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReference {
    number: String,
    url: String,
}

impl IssueReference {
    #[must_use]
    pub fn new(number: impl Into<String>, url_base: &str) -> Self {
        let number = number.into();
        let url = format!("{url_base}{number}");

        Self { number, url }
    }

    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The `Item:` trailer of a commit message, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFragment {
    reference: Option<IssueReference>,
}

impl IssueFragment {
    /// A fragment that renders nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds a fragment from an already known issue number. Blank numbers
    /// produce an empty fragment.
    #[must_use]
    pub fn from_number(number: &str, url_base: &str) -> Self {
        let number = number.trim();

        if number.is_empty() {
            return Self::none();
        }

        Self {
            reference: Some(IssueReference::new(number, url_base)),
        }
    }

    /// Works out the issue number for this commit.
    ///
    /// Nothing is looked up when issue references are disabled, and a
    /// detached HEAD yields no reference without prompting. Otherwise the
    /// number comes from the branch name, or from `prompter` when the branch
    /// does not carry one.
    ///
    /// # Errors
    /// * If the branch state cannot be read from git
    /// * If the prompt fails
    pub fn resolve(
        settings: &Settings,
        branches: &dyn BranchSource,
        prompter: &dyn Prompter,
    ) -> Result<Self> {
        if !settings.use_issue_in_msg {
            return Ok(Self::none());
        }

        let branch = match branches.branch_state()? {
            BranchState::Named(branch) => branch,
            BranchState::Detached => {
                debug!("HEAD is detached, skipping issue reference");
                return Ok(Self::none());
            }
        };

        let number = match issue_number_from_branch(&branch) {
            Some(number) => {
                debug!(%branch, %number, "issue number found in branch name");
                number
            }
            None => prompter.ask(ISSUE_PROMPT, "")?,
        };

        Ok(Self::from_number(&number, &settings.issue_url_base))
    }

    #[must_use]
    pub fn reference(&self) -> Option<&IssueReference> {
        self.reference.as_ref()
    }
}

impl MessageFragment for IssueFragment {
    fn render(&self) -> String {
        match &self.reference {
            Some(reference) => {
                format!("\nItem: {}\n{}\n\n", reference.number(), reference.url())
            }
            None => String::new(),
        }
    }
}

/// Extracts the issue number from a branch name.
///
/// Only the last `_`-separated segment is considered, lower-cased. The issue
/// number is whatever follows the first `issue` in that segment, so
/// `feature_issue12345` yields `12345`. Returns `None` when the segment does
/// not mention an issue.
#[must_use]
pub fn issue_number_from_branch(branch: &str) -> Option<String> {
    let segment = branch.rsplit('_').next()?.to_lowercase();

    segment
        .split_once(ISSUE_MARKER)
        .map(|(_, number)| number.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{git::branch::MockBranchSource, prompt::MockPrompter};

    fn settings(use_issue_in_msg: bool) -> Settings {
        Settings {
            use_issue_in_msg,
            issue_url_base: "https://tracker/".to_string(),
            ..Settings::default()
        }
    }

    fn on_branch(name: &'static str) -> MockBranchSource {
        let mut branches = MockBranchSource::new();
        branches
            .expect_branch_state()
            .returning(move || Ok(BranchState::Named(name.to_string())));
        branches
    }

    fn silent_prompter() -> MockPrompter {
        let mut prompter = MockPrompter::new();
        prompter.expect_ask().times(0);
        prompter
    }

    #[test]
    fn test_issue_number_from_branch() {
        assert_eq!(
            issue_number_from_branch("feature_issue12345"),
            Some("12345".to_string())
        );
        assert_eq!(
            issue_number_from_branch("fix_login_ISSUE42"),
            Some("42".to_string())
        );
        assert_eq!(issue_number_from_branch("issue7"), Some("7".to_string()));
        assert_eq!(
            issue_number_from_branch("feat/auth_myissue99"),
            Some("99".to_string())
        );
        assert_eq!(issue_number_from_branch("issue12_cleanup"), None);
        assert_eq!(issue_number_from_branch("main"), None);
        assert_eq!(issue_number_from_branch(""), None);
    }

    #[test]
    fn test_branch_issue_is_rendered() {
        let fragment =
            IssueFragment::resolve(&settings(true), &on_branch("feature_issue12345"), &silent_prompter())
                .unwrap();

        let rendered = fragment.render();
        assert_eq!(rendered, "\nItem: 12345\nhttps://tracker/12345\n\n");
        assert!(rendered.contains("Item: 12345"));
        assert!(rendered.contains("https://tracker/12345"));
    }

    #[test]
    fn test_disabled_skips_git_and_prompt() {
        let mut branches = MockBranchSource::new();
        branches.expect_branch_state().times(0);

        let fragment =
            IssueFragment::resolve(&settings(false), &branches, &silent_prompter()).unwrap();

        assert_eq!(fragment.render(), "");
    }

    #[test]
    fn test_detached_head_yields_nothing_without_prompting() {
        let mut branches = MockBranchSource::new();
        branches
            .expect_branch_state()
            .returning(|| Ok(BranchState::Detached));

        let fragment =
            IssueFragment::resolve(&settings(true), &branches, &silent_prompter()).unwrap();

        assert_eq!(fragment.reference(), None);
        assert_eq!(fragment.render(), "");
    }

    #[test]
    fn test_prompts_when_branch_has_no_issue() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_ask()
            .times(1)
            .returning(|message, _| {
                assert_eq!(message, ISSUE_PROMPT);
                Ok(" 678 ".to_string())
            });

        let fragment =
            IssueFragment::resolve(&settings(true), &on_branch("main"), &prompter).unwrap();

        assert_eq!(fragment.render(), "\nItem: 678\nhttps://tracker/678\n\n");
    }

    #[test]
    fn test_empty_prompt_answer_yields_nothing() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_ask()
            .times(1)
            .returning(|_, _| Ok(String::new()));

        let fragment =
            IssueFragment::resolve(&settings(true), &on_branch("develop"), &prompter).unwrap();

        assert_eq!(fragment.render(), "");
    }

    #[test]
    fn test_branch_with_bare_issue_marker_yields_nothing() {
        let fragment =
            IssueFragment::resolve(&settings(true), &on_branch("feature_issue"), &silent_prompter())
                .unwrap();

        assert_eq!(fragment.render(), "");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let first =
            IssueFragment::resolve(&settings(true), &on_branch("x_issue1"), &silent_prompter())
                .unwrap();
        let second =
            IssueFragment::resolve(&settings(true), &on_branch("x_issue1"), &silent_prompter())
                .unwrap();

        assert_eq!(first, second);
        assert_eq!(first.render(), second.render());
        assert_eq!(first.render(), first.render());
    }
}
