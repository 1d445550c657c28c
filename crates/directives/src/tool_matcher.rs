//! Matching requested tool names against the catalog.

use std::collections::BTreeSet;

use flagline_core::request::GenerationRequest;
use flagline_core::tool::ToolDescriptor;
use tracing::debug;

use crate::names::normalize;

pub struct ToolMatcher;

impl ToolMatcher {
    /// Catalog entry for one requested name: exact name first, then the
    /// normalized name or any normalized alias.
    pub fn find<'a>(requested: &str, catalog: &'a [ToolDescriptor]) -> Option<&'a ToolDescriptor> {
        if let Some(tool) = catalog.iter().find(|t| t.name == requested) {
            return Some(tool);
        }
        let wanted = normalize(requested);
        catalog.iter().find(|t| {
            normalize(&t.name) == wanted || t.aliases.iter().any(|a| normalize(a) == wanted)
        })
    }

    /// Names of the catalog tools matching `requested`. Unmatched names are
    /// dropped.
    pub fn match_tools(requested: &BTreeSet<String>, catalog: &[ToolDescriptor]) -> BTreeSet<String> {
        let mut matched = BTreeSet::new();
        for name in requested {
            match Self::find(name, catalog) {
                Some(tool) => {
                    matched.insert(tool.name.clone());
                }
                None => debug!(tool = %name, "Requested tool not in catalog"),
            }
        }
        matched
    }

    /// The tools to attach to a resolved request, in catalog order:
    /// default-enabled tools plus the matched requested ones, or none at all
    /// under `-no-tools`.
    pub fn select(request: &GenerationRequest, catalog: &[ToolDescriptor]) -> Vec<ToolDescriptor> {
        if request.no_tools {
            return Vec::new();
        }
        let matched = Self::match_tools(&request.requested_tools, catalog);
        let mut seen = BTreeSet::new();
        catalog
            .iter()
            .filter(|t| t.enabled_by_default || matched.contains(&t.name))
            .filter(|t| seen.insert(t.name.clone()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagline_core::request::GenerationDefaults;

    fn catalog() -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new("WebSearch", &["search", "google"]),
            ToolDescriptor::new("image_generation", &["dalle", "images"]),
            ToolDescriptor::new("clock", &[]).enabled_by_default(),
        ]
    }

    fn requested(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn exact_then_normalized_matching() {
        let catalog = catalog();
        assert_eq!(ToolMatcher::find("WebSearch", &catalog).unwrap().name, "WebSearch");
        assert_eq!(ToolMatcher::find("web-search", &catalog).unwrap().name, "WebSearch");
        assert_eq!(ToolMatcher::find("Searches", &catalog).unwrap().name, "WebSearch");
        assert_eq!(ToolMatcher::find("-Image", &catalog).unwrap().name, "image_generation");
        assert!(ToolMatcher::find("calculator", &catalog).is_none());
    }

    #[test]
    fn unmatched_names_are_dropped() {
        let matched = ToolMatcher::match_tools(&requested(&["dalle", "nope"]), &catalog());
        assert_eq!(matched, requested(&["image_generation"]));
    }

    #[test]
    fn select_adds_defaults_in_catalog_order() {
        let mut req = GenerationRequest::from_defaults(&GenerationDefaults::default(), "");
        req.requested_tools = requested(&["images", "google", "search"]);
        let names: Vec<_> = ToolMatcher::select(&req, &catalog()).into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["WebSearch", "image_generation", "clock"]);
    }

    #[test]
    fn no_tools_wins() {
        let mut req = GenerationRequest::from_defaults(&GenerationDefaults::default(), "");
        req.requested_tools = requested(&["search"]);
        req.no_tools = true;
        assert!(ToolMatcher::select(&req, &catalog()).is_empty());
    }
}
