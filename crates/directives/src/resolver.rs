//! Resolver trait: the abstraction over directive handlers.
//!
//! Each resolver recognizes one directive (or a family of spellings) and
//! applies it to the request. The registry holds them in priority order.

use flagline_core::request::GenerationRequest;
use tracing::debug;

use crate::ResolveError;
use crate::scanner::Directive;

/// A handler for one directive family.
///
/// Resolvers hold no per-call state and may be shared across requests.
pub trait Resolver: Send + Sync {
    /// Primary spelling, used in logs and listings (e.g. "-model").
    fn name(&self) -> &str;

    /// Whether this resolver recognizes the directive's name.
    fn can_handle(&self, directive: &Directive) -> bool;

    /// Apply the directive to the request.
    ///
    /// A resolver may clear `directive.has_value` to keep the value token in
    /// the prompt, or set `directive.pass_through` to let later resolvers
    /// handle the same directive. On error the request must be unchanged.
    fn resolve(&self, request: &mut GenerationRequest, directive: &mut Directive) -> Result<(), ResolveError>;
}

/// An ordered list of resolvers. Earlier entries take precedence.
pub struct ResolverRegistry {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self { resolvers: Vec::new() }
    }

    /// Append a resolver at the lowest precedence.
    pub fn register(&mut self, resolver: Box<dyn Resolver>) {
        self.resolvers.push(resolver);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, resolver: Box<dyn Resolver>) -> Self {
        self.register(resolver);
        self
    }

    /// Primary names in precedence order.
    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Hand the directive to the first resolver that can handle it, and to
    /// further ones while the previous handler requested pass-through.
    pub fn dispatch(&self, request: &mut GenerationRequest, directive: &mut Directive) -> Result<(), ResolveError> {
        let mut handled = false;
        for resolver in &self.resolvers {
            if !resolver.can_handle(directive) {
                continue;
            }
            resolver.resolve(request, directive)?;
            debug!(directive = %directive.name, resolver = resolver.name(), "Directive resolved");
            handled = true;
            if !directive.pass_through {
                break;
            }
        }

        if handled {
            Ok(())
        } else {
            Err(ResolveError::UnrecognizedDirective {
                name: directive.name.clone(),
            })
        }
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
