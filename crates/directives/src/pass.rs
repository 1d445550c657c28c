//! One resolution pass: scan, dispatch, trim, repeat.

use flagline_core::request::GenerationRequest;
use tracing::{debug, warn};

use crate::ResolveError;
use crate::resolver::ResolverRegistry;
use crate::scanner;
use crate::trimmer;

/// Upper bound on directives consumed from a single text.
pub const MAX_DIRECTIVES_PER_TEXT: usize = 64;

/// Result of resolving one text.
#[derive(Debug, Clone, PartialEq)]
pub struct PassOutcome {
    /// Directives resolved and trimmed
    pub consumed: usize,
    /// Why scanning stopped early, if it did
    pub halt: Option<ResolveError>,
}

/// Consume directives from `request.prompt` until none remain or one
/// cannot be resolved.
///
/// A halt keeps everything trimmed so far and leaves the offending
/// directive and all text after it untouched.
pub fn resolve_directives(registry: &ResolverRegistry, request: &mut GenerationRequest) -> PassOutcome {
    let mut consumed = 0;

    while let Some(mut directive) = scanner::scan(&request.prompt, request.user_id.as_deref()) {
        if consumed >= MAX_DIRECTIVES_PER_TEXT {
            warn!(limit = MAX_DIRECTIVES_PER_TEXT, "Directive limit reached, leaving remaining text as-is");
            return halted(consumed, ResolveError::DirectiveLimit {
                limit: MAX_DIRECTIVES_PER_TEXT,
            });
        }

        if let Err(e) = registry.dispatch(request, &mut directive) {
            debug!(directive = %directive.name, error = %e, "Directive scanning halted");
            return halted(consumed, e);
        }

        match trimmer::trim_consumed(&request.prompt, &directive) {
            Some(trimmed) => request.prompt = trimmed,
            None => {
                debug!(directive = %directive.name, "Resolved directive text not found for trimming");
                return halted(consumed, ResolveError::TrimMiss {
                    name: directive.name.clone(),
                });
            }
        }
        consumed += 1;
    }

    PassOutcome { consumed, halt: None }
}

fn halted(consumed: usize, error: ResolveError) -> PassOutcome {
    PassOutcome {
        consumed,
        halt: Some(error),
    }
}
