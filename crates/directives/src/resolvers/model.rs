use std::sync::Arc;

use flagline_core::model::ModelCatalog;
use flagline_core::request::GenerationRequest;

use crate::ResolveError;
use crate::names;
use crate::resolver::Resolver;
use crate::scanner::Directive;

const NAMES: &[&str] = &["-model", "-m"];

/// `-model <name|alias>`.
///
/// An unknown value is not consumed: only the flag is trimmed and the word
/// stays in the prompt.
pub struct ModelResolver {
    catalog: Arc<ModelCatalog>,
}

impl ModelResolver {
    pub fn new(catalog: Arc<ModelCatalog>) -> Self {
        Self { catalog }
    }
}

impl Resolver for ModelResolver {
    fn name(&self) -> &str {
        "-model"
    }

    fn can_handle(&self, directive: &Directive) -> bool {
        names::matches_any(&directive.name, NAMES)
    }

    fn resolve(&self, request: &mut GenerationRequest, directive: &mut Directive) -> Result<(), ResolveError> {
        match self.catalog.find(&directive.value) {
            Some(model) => request.model = model.name.clone(),
            None => directive.has_value = false,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagline_core::model::ModelInfo;
    use flagline_core::request::GenerationDefaults;

    fn resolver() -> ModelResolver {
        ModelResolver::new(Arc::new(
            ModelCatalog::new(vec![
                ModelInfo::new("gpt-4", &["gpt4"]),
                ModelInfo::new("gpt-3.5-turbo", &["chatgpt", "gpt-3", "gpt3", "turbo"]),
            ])
            .unwrap(),
        ))
    }

    #[test]
    fn handles_both_spellings() {
        let r = resolver();
        assert!(r.can_handle(&Directive::new("-model", "x")));
        assert!(r.can_handle(&Directive::new("-M", "x")));
        assert!(!r.can_handle(&Directive::new("-models", "x")));
    }

    #[test]
    fn alias_sets_canonical_model() {
        let mut req = GenerationRequest::from_defaults(&GenerationDefaults::default(), "");
        let mut d = Directive::new("-m", "ChatGPT");
        resolver().resolve(&mut req, &mut d).unwrap();
        assert_eq!(req.model, "gpt-3.5-turbo");
        assert!(d.has_value);
    }

    #[test]
    fn unknown_model_keeps_value_in_prompt() {
        let mut req = GenerationRequest::from_defaults(&GenerationDefaults::default(), "");
        let before = req.model.clone();
        let mut d = Directive::new("-model", "bogus");
        resolver().resolve(&mut req, &mut d).unwrap();
        assert_eq!(req.model, before);
        assert!(!d.has_value);
    }
}
