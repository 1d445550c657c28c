//! Directive scanner.
//!
//! Grammar (informal):
//! ```text
//! directive = "-" NAME [ WS+ value ]
//! NAME      = ( WORD_CHAR | "-" )+
//! value     = QUOTED_STRING | NON_WS+
//! ```
//!
//! The scanner only finds the first occurrence in the text. The resolution
//! pass rescans after every trim, so the text it sees is always the
//! remaining prompt.

use std::ops::Range;
use std::sync::LazyLock;

use regex_lite::Regex;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(-(?:\w|-)+)(?:\s+("(?:[^"\\]|\\.)*")|\s+(\S+))?"#)
        .expect("directive pattern is valid")
});

/// One directive occurrence found in a text.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    /// Name as written, leading dash included (`-Temperature`)
    pub name: String,

    /// Value token as matched, quotes included; empty when absent
    pub raw_value: String,

    /// Value with surrounding quotes removed and escapes resolved
    pub value: String,

    /// Cleared by a resolver that did not consume the value token
    pub has_value: bool,

    /// Set by a resolver that wants later resolvers to see this directive too
    pub pass_through: bool,

    /// The user the enclosing request is resolved for
    pub user_id: Option<String>,

    /// Byte range of the match in the scanned text
    pub span: Range<usize>,
}

impl Directive {
    /// A directive detached from any text, mostly for tests and tooling.
    pub fn new(name: impl Into<String>, raw_value: impl Into<String>) -> Self {
        let raw_value = raw_value.into();
        let value = unquote(&raw_value);
        Self {
            name: name.into(),
            raw_value,
            value,
            has_value: true,
            pass_through: false,
            user_id: None,
            span: 0..0,
        }
    }

    pub fn with_user(mut self, user_id: Option<&str>) -> Self {
        self.user_id = user_id.map(str::to_string);
        self
    }
}

/// Find the first directive in `text`.
pub fn scan(text: &str, user_id: Option<&str>) -> Option<Directive> {
    let caps = DIRECTIVE.captures(text)?;
    let whole = caps.get(0)?;
    let name = caps.get(1)?.as_str().to_string();
    let raw_value = caps
        .get(2)
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let value = unquote(&raw_value);

    Some(Directive {
        name,
        raw_value,
        value,
        has_value: true,
        pass_through: false,
        user_id: user_id.map(str::to_string),
        span: whole.range(),
    })
}

/// Strip surrounding quotes. A properly quoted string also has its
/// backslash escapes resolved; a bare token only loses stray quote marks.
fn unquote(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') && !ends_escaped(raw) {
        let inner = &raw[1..raw.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped @ ('"' | '\\')) => out.push(escaped),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => out.push('\\'),
                },
                other => out.push(other),
            }
        }
        return out;
    }
    raw.trim_matches('"').to_string()
}

/// Whether the closing quote of `raw` is itself escaped.
fn ends_escaped(raw: &str) -> bool {
    let body = &raw[1..raw.len() - 1];
    body.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_name_and_bare_value() {
        let d = scan("-maxTokens 20 rest", None).unwrap();
        assert_eq!(d.name, "-maxTokens");
        assert_eq!(d.raw_value, "20");
        assert_eq!(d.value, "20");
        assert!(d.has_value);
        assert_eq!(d.span, 0..13);
    }

    #[test]
    fn scans_quoted_value() {
        let d = scan(r#"-system "You are a pirate" ahoy"#, None).unwrap();
        assert_eq!(d.name, "-system");
        assert_eq!(d.raw_value, r#""You are a pirate""#);
        assert_eq!(d.value, "You are a pirate");
    }

    #[test]
    fn quoted_value_resolves_escapes() {
        let d = scan(r#"-s "say \"hi\" now" tail"#, None).unwrap();
        assert_eq!(d.value, r#"say "hi" now"#);
    }

    #[test]
    fn empty_quotes_give_empty_value() {
        let d = scan(r#"-context "" next"#, None).unwrap();
        assert_eq!(d.raw_value, r#""""#);
        assert_eq!(d.value, "");
    }

    #[test]
    fn unterminated_quote_falls_back_to_token() {
        let d = scan(r#"-s "Hello. world"#, None).unwrap();
        assert_eq!(d.raw_value, r#""Hello."#);
        assert_eq!(d.value, "Hello.");
    }

    #[test]
    fn symbol_heavy_token_kept_verbatim() {
        let d = scan(r#"-s !@#$%^&*():""\ tail"#, None).unwrap();
        assert_eq!(d.value, r#"!@#$%^&*():""\"#);
    }

    #[test]
    fn name_without_value() {
        let d = scan("-no-tools", None).unwrap();
        assert_eq!(d.name, "-no-tools");
        assert!(d.raw_value.is_empty());
    }

    #[test]
    fn finds_first_directive_anywhere() {
        let d = scan("please -t 0.5 thanks", Some("U1")).unwrap();
        assert_eq!(d.name, "-t");
        assert_eq!(d.span.start, 7);
        assert_eq!(d.user_id.as_deref(), Some("U1"));
    }

    #[test]
    fn plain_text_has_no_directive() {
        assert!(scan("How's the weather?", None).is_none());
        assert!(scan("a - b", None).is_none());
    }

    #[test]
    fn value_may_span_newline_whitespace() {
        let d = scan("-t\n0.5 body", None).unwrap();
        assert_eq!(d.value, "0.5");
    }
}
