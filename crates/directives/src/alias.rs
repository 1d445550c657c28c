//! First-word model selection, e.g. `gpt-4 write me a poem`.

use std::sync::Arc;

use flagline_core::model::ModelCatalog;
use flagline_core::request::GenerationRequest;
use tracing::debug;

pub struct ModelAliasResolver {
    catalog: Arc<ModelCatalog>,
}

impl ModelAliasResolver {
    pub fn new(catalog: Arc<ModelCatalog>) -> Self {
        Self { catalog }
    }

    /// Strip a leading model word from the prompt and select that model.
    ///
    /// Without one, a model that is not a canonical catalog name falls back
    /// to the catalog default. Returns true when a word was consumed.
    pub fn apply(&self, request: &mut GenerationRequest) -> bool {
        let text = request.prompt.trim_start();
        let word = text.split_whitespace().next().unwrap_or("");

        if let Some(model) = self.catalog.find(word) {
            debug!(word, model = %model.name, "Model selected by leading word");
            request.model = model.name.clone();
            request.prompt = text[word.len()..].trim_start().to_string();
            return true;
        }

        if !self.catalog.is_canonical(&request.model) {
            let fallback = self.catalog.default_model();
            debug!(requested = %request.model, model = %fallback.name, "Unknown model, using default");
            request.model = fallback.name.clone();
        }
        false
    }
}
