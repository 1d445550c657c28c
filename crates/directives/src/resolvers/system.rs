use flagline_core::request::GenerationRequest;

use crate::ResolveError;
use crate::names;
use crate::resolver::Resolver;
use crate::scanner::Directive;

const NAMES: &[&str] = &["-system", "-s"];

/// `-system <text>` replaces the system message for this turn only.
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn name(&self) -> &str {
        "-system"
    }

    fn can_handle(&self, directive: &Directive) -> bool {
        names::matches_any(&directive.name, NAMES)
    }

    fn resolve(&self, request: &mut GenerationRequest, directive: &mut Directive) -> Result<(), ResolveError> {
        request.system.replace(directive.value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagline_core::request::GenerationDefaults;
    use flagline_core::system::ContextStatus;

    #[test]
    fn replaces_system_without_touching_context() {
        let mut req = GenerationRequest::from_defaults(&GenerationDefaults::default(), "");
        let mut d = Directive::new("-S", "\"Hello.\"");
        assert!(SystemResolver.can_handle(&d));
        SystemResolver.resolve(&mut req, &mut d).unwrap();
        assert_eq!(req.system.build("preamble"), "Hello.");
        assert!(req.system.is_modified());
        assert_eq!(req.system.context_status(), ContextStatus::None);
    }
}
