use flagline_core::request::GenerationRequest;

use crate::ResolveError;
use crate::names;
use crate::resolver::Resolver;
use crate::scanner::Directive;

const INCLUDE_NAMES: &[&str] = &[
    "-tool",
    "-add-tool",
    "-enable-tool",
    "-attach-tool",
    "-use-tool",
    "-tool-enable",
    "-tool-add",
    "-tool-attach",
    "-tool-use",
    "-use",
];

const DISABLE_NAMES: &[&str] = &["-no-tools", "-disable-tools"];

/// `-tool <name>` requests a tool; matching against the catalog happens
/// after resolution.
pub struct ToolInclusionResolver;

impl Resolver for ToolInclusionResolver {
    fn name(&self) -> &str {
        "-tool"
    }

    fn can_handle(&self, directive: &Directive) -> bool {
        names::matches_any_normalized(&directive.name, INCLUDE_NAMES)
    }

    fn resolve(&self, request: &mut GenerationRequest, directive: &mut Directive) -> Result<(), ResolveError> {
        if directive.value.is_empty() {
            directive.has_value = false;
            return Ok(());
        }
        request.requested_tools.insert(directive.value.clone());
        Ok(())
    }
}

/// `-no-tools` disables every tool, default-enabled ones included.
pub struct NoToolsResolver;

impl Resolver for NoToolsResolver {
    fn name(&self) -> &str {
        "-noTools"
    }

    fn can_handle(&self, directive: &Directive) -> bool {
        names::matches_any_normalized(&directive.name, DISABLE_NAMES)
    }

    fn resolve(&self, request: &mut GenerationRequest, directive: &mut Directive) -> Result<(), ResolveError> {
        request.no_tools = true;
        directive.has_value = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagline_core::request::GenerationDefaults;

    fn request() -> GenerationRequest {
        GenerationRequest::from_defaults(&GenerationDefaults::default(), "")
    }

    #[test]
    fn inclusion_spellings_normalize() {
        for name in ["-tool", "-tools", "-Use-Tool", "-tool_attach", "-use"] {
            assert!(ToolInclusionResolver.can_handle(&Directive::new(name, "x")), "{name}");
        }
        assert!(!ToolInclusionResolver.can_handle(&Directive::new("-no-tools", "")));
    }

    #[test]
    fn inclusion_collects_names() {
        let mut req = request();
        let mut d = Directive::new("-tool", "web_search");
        ToolInclusionResolver.resolve(&mut req, &mut d).unwrap();
        let mut d = Directive::new("-use", "\"image\"");
        ToolInclusionResolver.resolve(&mut req, &mut d).unwrap();
        assert!(req.requested_tools.contains("web_search"));
        assert!(req.requested_tools.contains("image"));
        assert!(d.has_value);
    }

    #[test]
    fn no_tools_is_name_only() {
        let mut req = request();
        let mut d = Directive::new("-disable_tools", "please");
        assert!(NoToolsResolver.can_handle(&d));
        NoToolsResolver.resolve(&mut req, &mut d).unwrap();
        assert!(req.no_tools);
        assert!(!d.has_value);
    }
}
