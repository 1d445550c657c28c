//! Prompt trimmer: removes consumed directive text from the prompt.
//!
//! Trimming targets the first case-insensitive textual occurrence of the
//! directive, not the span the scanner matched. If the same text appears
//! earlier in the prompt (for instance inside a command body that was just
//! prefixed), that earlier occurrence is the one removed.

use regex_lite::Regex;

use crate::scanner::Directive;

/// Remove the directive's text from `prompt`.
///
/// With `has_value` the name, the whitespace and the raw value token are
/// removed; otherwise only the name. Trailing whitespace after the removed
/// text goes with it and the result is trimmed. Returns `None` when the text
/// no longer occurs in the prompt.
pub fn trim_consumed(prompt: &str, directive: &Directive) -> Option<String> {
    let name = regex_lite::escape(&directive.name);
    let pattern = if directive.has_value && !directive.raw_value.is_empty() {
        format!(r"(?i){name}\s+{}\s*", regex_lite::escape(&directive.raw_value))
    } else {
        format!(r"(?i){name}(?:\s+|$)")
    };
    let re = Regex::new(&pattern).ok()?;
    let found = re.find(prompt)?;

    let mut trimmed = String::with_capacity(prompt.len());
    trimmed.push_str(&prompt[..found.start()]);
    trimmed.push_str(&prompt[found.end()..]);
    Some(trimmed.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valued(name: &str, raw: &str) -> Directive {
        Directive::new(name, raw)
    }

    fn bare(name: &str) -> Directive {
        let mut d = Directive::new(name, "");
        d.has_value = false;
        d
    }

    #[test]
    fn removes_name_and_value() {
        let out = trim_consumed("-maxTokens 20 How's the weather?", &valued("-maxTokens", "20"));
        assert_eq!(out.as_deref(), Some("How's the weather?"));
    }

    #[test]
    fn removes_quoted_value_with_quotes() {
        let out = trim_consumed(r#"-s "Be brief." Explain DNS"#, &valued("-s", r#""Be brief.""#));
        assert_eq!(out.as_deref(), Some("Explain DNS"));
    }

    #[test]
    fn name_only_leaves_value_token() {
        let mut d = valued("-model", "bogus");
        d.has_value = false;
        let out = trim_consumed("-model bogus hi", &d);
        assert_eq!(out.as_deref(), Some("bogus hi"));
    }

    #[test]
    fn name_only_at_end_of_text() {
        let out = trim_consumed("summarize this -no-tools", &bare("-no-tools"));
        assert_eq!(out.as_deref(), Some("summarize this"));
    }

    #[test]
    fn match_is_case_insensitive() {
        let out = trim_consumed("-TEMP 0.3 go", &valued("-temp", "0.3"));
        assert_eq!(out.as_deref(), Some("go"));
    }

    #[test]
    fn mid_text_removal_keeps_single_space() {
        let out = trim_consumed("a -t 0.5 b", &valued("-t", "0.5"));
        assert_eq!(out.as_deref(), Some("a b"));
    }

    #[test]
    fn first_textual_occurrence_wins() {
        // The scanner matched the later span; the earlier copy is removed.
        let out = trim_consumed("Use -cmd often\n-cmd hello", &bare("-cmd"));
        assert_eq!(out.as_deref(), Some("Use often\n-cmd hello"));
    }

    #[test]
    fn missing_text_yields_none() {
        assert!(trim_consumed("nothing here", &valued("-t", "1")).is_none());
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let out = trim_consumed("-s (a+b)* rest", &valued("-s", "(a+b)*"));
        assert_eq!(out.as_deref(), Some("rest"));
    }
}
