//! Directive and tool name normalization.
//!
//! Two levels are used:
//! - [`fold`] only lowercases, for resolvers with an explicit spelling list
//!   (`-maxTokens`, `-max_tokens`, ...).
//! - [`normalize`] also drops the leading dash, separators and a plural
//!   suffix, so `-No_Tools`, `-no-tool` and `-notools` compare equal.

/// Lowercase a name for case-insensitive comparison.
pub fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// True when `name` equals any entry of `names`, ignoring case.
pub fn matches_any(name: &str, names: &[&str]) -> bool {
    let folded = fold(name);
    names.iter().any(|n| fold(n) == folded)
}

/// True when `name` equals any entry of `names` after full normalization.
pub fn matches_any_normalized(name: &str, names: &[&str]) -> bool {
    let normalized = normalize(name);
    names.iter().any(|n| normalize(n) == normalized)
}

/// Canonical form: no leading dashes, no `-`/`_`/spaces, lowercase, singular.
pub fn normalize(name: &str) -> String {
    let collapsed: String = name
        .trim_start_matches('-')
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect();
    singularize(&collapsed)
}

/// Strip a simple English plural suffix.
pub fn singularize(word: &str) -> String {
    if word.len() > 3 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    for suffix in ["sses", "shes", "ches", "xes"] {
        if word.len() > suffix.len() && word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.len() > 1 && word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_lowercases_only() {
        assert_eq!(fold("-maxTokens"), "-maxtokens");
        assert!(matches_any("-MaxTokens", &["-maxtokens"]));
        assert!(!matches_any("-max-tokens", &["-maxtokens"]));
    }

    #[test]
    fn normalize_collapses_spelling_variants() {
        assert_eq!(normalize("-no-tools"), "notool");
        assert_eq!(normalize("-No_Tools"), "notool");
        assert_eq!(normalize("-notool"), "notool");
        assert_eq!(normalize("web_search"), "websearch");
        assert_eq!(normalize("Web-Searches"), "websearch");
    }

    #[test]
    fn singularize_common_suffixes() {
        assert_eq!(singularize("queries"), "query");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("tools"), "tool");
        assert_eq!(singularize("class"), "class");
        assert_eq!(singularize("s"), "s");
    }

    #[test]
    fn normalized_list_matching() {
        let names = ["-no-tools", "-disable-tools"];
        assert!(matches_any_normalized("-disable_tool", &names));
        assert!(matches_any_normalized("-NOTOOLS", &names));
        assert!(!matches_any_normalized("-tools", &names));
    }
}
