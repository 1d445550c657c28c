//! Inline directive resolution: turns `-flag value` text embedded in chat
//! prompts into a resolved generation request.
//!
//! Users steer the bot from inside the message itself:
//!
//! ```text
//! -model gpt-4 -temperature 0.2 -context "You review Rust code." how does this look?
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │   Scanner    │───▶│   Resolver   │───▶│   Trimmer    │
//! │ (first -flag)│    │   Registry   │    │ (strip text) │
//! └──────────────┘    └──────────────┘    └──────────────┘
//!        ▲                                       │
//!        └──────────── repeat until halt ────────┘
//! ```
//!
//! [`DirectiveEngine`] runs that loop over every visible turn of a thread
//! (history first, discovery only) and then the current turn, derives the
//! carried context, and assembles the outbound message list.
//!
//! Scanning stops at the first directive nothing can handle. Everything from
//! that point on reaches the model verbatim.

pub mod alias;
pub mod engine;
pub mod names;
pub mod pass;
pub mod resolver;
pub mod resolvers;
pub mod scanner;
pub mod tool_matcher;
pub mod trimmer;

pub use alias::ModelAliasResolver;
pub use engine::{Completion, DirectiveEngine, EngineSettings, ResolvedRequest};
pub use pass::{MAX_DIRECTIVES_PER_TEXT, PassOutcome, resolve_directives};
pub use resolver::{Resolver, ResolverRegistry};
pub use scanner::{Directive, scan};
pub use tool_matcher::ToolMatcher;

use flagline_core::error::CommandStoreError;
use serde::{Deserialize, Serialize};

/// Why a resolution pass stopped consuming directives.
///
/// Every variant halts scanning of the current text. The variants stay
/// distinct so callers can tell an unknown flag from a bad value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("unrecognized directive '{name}'")]
    UnrecognizedDirective { name: String },

    /// A resolver rejected its value outright. The numeric parameters never
    /// raise this; they leave the field unchanged instead.
    #[error("malformed value '{value}' for '{name}': {reason}")]
    MalformedValue { name: String, value: String, reason: String },

    #[error("command lookup for '{name}' failed: {source}")]
    CommandStore {
        name: String,
        #[source]
        source: CommandStoreError,
    },

    #[error("resolved directive '{name}' not found in prompt text")]
    TrimMiss { name: String },

    #[error("more than {limit} directives in one text")]
    DirectiveLimit { limit: usize },
}

impl ResolveError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ResolveError::UnrecognizedDirective { .. } => DiagnosticKind::UnrecognizedDirective,
            ResolveError::MalformedValue { .. } => DiagnosticKind::MalformedValue,
            ResolveError::CommandStore { .. } => DiagnosticKind::CommandStore,
            ResolveError::TrimMiss { .. } => DiagnosticKind::TrimMiss,
            ResolveError::DirectiveLimit { .. } => DiagnosticKind::DirectiveLimit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnrecognizedDirective,
    MalformedValue,
    CommandStore,
    TrimMiss,
    DirectiveLimit,
    ToolCatalog,
}

/// A non-fatal event recorded while resolving a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Index into the supplied turns; `None` for request-level events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<usize>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn for_turn(turn: usize, error: &ResolveError) -> Self {
        Self {
            turn: Some(turn),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halt_kinds_are_distinguishable() {
        let unknown = ResolveError::UnrecognizedDirective { name: "-bogus".into() };
        let malformed = ResolveError::MalformedValue {
            name: "-t".into(),
            value: "1-2".into(),
            reason: "invalid float literal".into(),
        };
        assert_ne!(unknown.kind(), malformed.kind());
        assert!(malformed.to_string().contains("1-2"));
    }

    #[test]
    fn diagnostic_serializes_kind_snake_case() {
        let d = Diagnostic::for_turn(2, &ResolveError::UnrecognizedDirective { name: "-x".into() });
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "unrecognized_directive");
        assert_eq!(json["turn"], 2);
    }
}
