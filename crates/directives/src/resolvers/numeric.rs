use flagline_core::request::GenerationRequest;
use tracing::debug;

use crate::ResolveError;
use crate::names;
use crate::resolver::Resolver;
use crate::scanner::Directive;

/// The request field a [`NumericResolver`] writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    MaxTokens,
    Temperature,
    TopP,
    PresencePenalty,
    FrequencyPenalty,
}

/// A sampling parameter directive such as `-temperature 0.2`.
///
/// The value is sanitized first (see [`sanitize_number`]). If what is left
/// does not parse (empty, sign only, negative token count, overflow) the
/// field stays as it was but the directive is still consumed.
pub struct NumericResolver {
    primary: &'static str,
    names: &'static [&'static str],
    field: NumericField,
}

impl NumericResolver {
    pub fn max_tokens() -> Self {
        Self {
            primary: "-maxTokens",
            names: &["-max_tokens", "-max-tokens", "-maxtokens", "-maxtoken", "-max-token", "-max_token"],
            field: NumericField::MaxTokens,
        }
    }

    pub fn temperature() -> Self {
        Self {
            primary: "-temperature",
            names: &["-temperature", "-temp", "-t"],
            field: NumericField::Temperature,
        }
    }

    pub fn top_p() -> Self {
        Self {
            primary: "-topP",
            names: &["-top_p", "-top-p", "-topp"],
            field: NumericField::TopP,
        }
    }

    pub fn presence_penalty() -> Self {
        Self {
            primary: "-presencePenalty",
            names: &["-presence_penalty", "-presence-penalty", "-presencepenalty"],
            field: NumericField::PresencePenalty,
        }
    }

    pub fn frequency_penalty() -> Self {
        Self {
            primary: "-frequencyPenalty",
            names: &["-frequency_penalty", "-frequency-penalty", "-frequencypenalty"],
            field: NumericField::FrequencyPenalty,
        }
    }

    pub fn field(&self) -> NumericField {
        self.field
    }

    fn ignore(&self, directive: &Directive, reason: impl std::fmt::Display) {
        debug!(
            directive = %directive.name,
            value = %directive.value,
            reason = %reason,
            "Ignoring unparsable numeric value"
        );
    }
}

impl Resolver for NumericResolver {
    fn name(&self) -> &str {
        self.primary
    }

    fn can_handle(&self, directive: &Directive) -> bool {
        names::matches_any(&directive.name, self.names)
    }

    fn resolve(&self, request: &mut GenerationRequest, directive: &mut Directive) -> Result<(), ResolveError> {
        let sanitized = sanitize_number(&directive.value);
        if sanitized.is_empty() {
            return Ok(());
        }

        if self.field == NumericField::MaxTokens {
            match sanitized.parse::<u32>() {
                Ok(value) => request.max_tokens = value,
                Err(e) => self.ignore(directive, e),
            }
            return Ok(());
        }

        let value = match sanitized.parse::<f32>() {
            Ok(value) => value,
            Err(e) => {
                self.ignore(directive, e);
                return Ok(());
            }
        };
        match self.field {
            NumericField::Temperature => request.temperature = value,
            NumericField::TopP => request.top_p = value,
            NumericField::PresencePenalty => request.presence_penalty = value,
            NumericField::FrequencyPenalty => request.frequency_penalty = value,
            NumericField::MaxTokens => {}
        }
        Ok(())
    }
}

/// Keep digits, signs and the first decimal separator; `,` becomes `.`.
pub fn sanitize_number(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut seen_separator = false;
    for c in value.chars() {
        match c {
            '0'..='9' | '+' | '-' => out.push(c),
            '.' | ',' if !seen_separator => {
                seen_separator = true;
                out.push('.');
            }
            _ => {}
        }
    }
    out
}
