//! System message assembly.
//!
//! The builder collects fragments contributed by directives during one
//! resolution pass. It is a call-scoped value: persistent "context" across
//! turns is reconstructed by replaying history, never stored here.

use serde::{Deserialize, Serialize};

/// Whether a turn set, cleared, or left alone the persistent context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextStatus {
    #[default]
    None,
    Set,
    Cleared,
}

/// Accumulates system-message fragments for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMessageBuilder {
    fragments: Vec<String>,
    should_replace: bool,
    modified: bool,
    context_status: ContextStatus,
}

impl SystemMessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder seeded with a configured system text.
    ///
    /// The base replaces the preamble but does not count as a modification,
    /// so carried context may still override it.
    pub fn with_base(system: impl Into<String>) -> Self {
        Self {
            fragments: vec![system.into()],
            should_replace: true,
            ..Self::default()
        }
    }

    /// Add a fragment after the existing ones.
    pub fn append(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// Add `fragment` and drop the preamble from the built message.
    ///
    /// Earlier fragments are kept; replacing only affects the preamble.
    pub fn replace(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
        self.should_replace = true;
        self.modified = true;
    }

    pub fn set_context_status(&mut self, status: ContextStatus) {
        self.context_status = status;
    }

    pub fn context_status(&self) -> ContextStatus {
        self.context_status
    }

    /// True once a directive replaced the content in this pass.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn should_replace(&self) -> bool {
        self.should_replace
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Fragments joined with a single space.
    pub fn content(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.as_str())
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Build the outbound system text, prepending `preamble` unless a
    /// replacing fragment was added.
    pub fn build(&self, preamble: &str) -> String {
        let content = self.content();
        if self.should_replace {
            return content;
        }
        match (preamble.is_empty(), content.is_empty()) {
            (_, true) => preamble.to_string(),
            (true, false) => content,
            (false, false) => format!("{preamble} {content}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREAMBLE: &str = "You are a helpful assistant.";

    #[test]
    fn empty_builder_yields_preamble() {
        let b = SystemMessageBuilder::new();
        assert_eq!(b.build(PREAMBLE), PREAMBLE);
        assert!(!b.is_modified());
        assert_eq!(b.context_status(), ContextStatus::None);
    }

    #[test]
    fn appended_fragments_follow_preamble() {
        let mut b = SystemMessageBuilder::new();
        b.append("Be terse.");
        b.append("Use metric units.");
        assert_eq!(
            b.build(PREAMBLE),
            "You are a helpful assistant. Be terse. Use metric units."
        );
        assert!(!b.is_modified());
    }

    #[test]
    fn replace_drops_preamble_and_marks_modified() {
        let mut b = SystemMessageBuilder::new();
        b.replace("You are a pirate.");
        assert_eq!(b.build(PREAMBLE), "You are a pirate.");
        assert!(b.is_modified());
        assert!(b.should_replace());
    }

    #[test]
    fn replace_keeps_earlier_fragments() {
        let mut b = SystemMessageBuilder::new();
        b.append("X");
        b.replace("B");
        assert_eq!(b.build(PREAMBLE), "X B");

        let mut b = SystemMessageBuilder::new();
        b.replace("A");
        b.replace("B");
        assert_eq!(b.build(PREAMBLE), "A B");
        assert_eq!(b.fragments(), ["A", "B"]);
    }

    #[test]
    fn replace_after_base_keeps_base() {
        let mut b = SystemMessageBuilder::with_base("Default");
        b.replace("B");
        assert_eq!(b.build(PREAMBLE), "Default B");
        assert!(b.is_modified());
    }

    #[test]
    fn append_after_replace_keeps_both() {
        let mut b = SystemMessageBuilder::new();
        b.replace("A");
        b.append("B");
        assert_eq!(b.build(PREAMBLE), "A B");
    }

    #[test]
    fn base_replaces_preamble_without_modification() {
        let b = SystemMessageBuilder::with_base("Corporate persona.");
        assert_eq!(b.build(PREAMBLE), "Corporate persona.");
        assert!(b.should_replace());
        assert!(!b.is_modified());
    }
}
