use flagline_core::request::GenerationRequest;
use flagline_core::system::ContextStatus;

use crate::ResolveError;
use crate::names;
use crate::resolver::Resolver;
use crate::scanner::Directive;

/// Values that clear the carried context instead of setting it.
pub const CONTEXT_CLEAR_VALUES: &[&str] = &["clear", "null", "none", "reset", "empty", ""];

/// `-context <text>` sets a system message that later turns inherit;
/// `-context clear` (or a synonym) drops it.
pub struct ContextResolver;

impl Resolver for ContextResolver {
    fn name(&self) -> &str {
        "-context"
    }

    fn can_handle(&self, directive: &Directive) -> bool {
        names::matches_any(&directive.name, &["-context"])
    }

    fn resolve(&self, request: &mut GenerationRequest, directive: &mut Directive) -> Result<(), ResolveError> {
        if names::matches_any(&directive.value, CONTEXT_CLEAR_VALUES) {
            request.system.set_context_status(ContextStatus::Cleared);
            return Ok(());
        }
        request.system.set_context_status(ContextStatus::Set);
        request.system.replace(directive.value.clone());
        Ok(())
    }
}
