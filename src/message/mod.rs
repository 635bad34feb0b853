//! Commit Message Fragments
//!
//! Each fragment is computed once, then rendered as many times as needed.
//! Rendering never mutates the fragment, so two renders are byte-identical.

pub mod coauthors;
pub mod issue;

pub use coauthors::{CoauthorSelection, CoauthorsFragment};
pub use issue::{IssueFragment, IssueReference};

/// A piece of text merged into the commit message.
pub trait MessageFragment {
    /// The text appended to the commit message body.
    fn render(&self) -> String;
}

/// A fragment whose content is used as-is, such as a precomputed
/// co-authors message file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbatimFragment {
    content: String,
}

impl VerbatimFragment {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl MessageFragment for VerbatimFragment {
    fn render(&self) -> String {
        self.content.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_fragment_renders_content_unchanged() {
        let fragment = VerbatimFragment::new("\n\nCo-authored-by: A <a@b.c>\n\n");

        assert_eq!(fragment.render(), "\n\nCo-authored-by: A <a@b.c>\n\n");
        assert_eq!(fragment.render(), fragment.render());
    }
}
