//! Conversation replay.
//!
//! Nothing is remembered between calls. Every call replays the visible
//! history to rediscover the context message a user set earlier, then
//! resolves the current turn against live defaults.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use flagline_core::backend::{CompletionBackend, CompletionRequest};
use flagline_core::command::{Command, CommandStore};
use flagline_core::error::BackendError;
use flagline_core::message::{ChatMessage, Turn};
use flagline_core::model::ModelCatalog;
use flagline_core::request::{GenerationDefaults, GenerationRequest};
use flagline_core::system::{ContextStatus, SystemMessageBuilder};
use flagline_core::tool::{ToolCatalog, ToolDescriptor};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::alias::ModelAliasResolver;
use crate::pass::resolve_directives;
use crate::resolver::ResolverRegistry;
use crate::resolvers::standard_registry;
use crate::tool_matcher::ToolMatcher;
use crate::{Diagnostic, DiagnosticKind};

/// Placeholder in the preamble replaced by the current UTC time.
pub const TODAY_PLACEHOLDER: &str = "{today}";

const TODAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Everything the engine needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Values every request starts from
    pub defaults: GenerationDefaults,

    /// Persona text used unless a directive replaces the system message
    pub preamble: String,

    pub catalog: Arc<ModelCatalog>,

    /// Commands available to every user
    pub predefined: Vec<Command>,
}

/// The outcome of resolving a conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedRequest {
    pub request: GenerationRequest,

    /// The assembled system text, also the first entry of `messages`
    pub system_message: String,

    /// System message, then every turn with consumed directive text removed
    pub messages: Vec<ChatMessage>,

    pub tools: Vec<ToolDescriptor>,

    pub diagnostics: Vec<Diagnostic>,
}

impl ResolvedRequest {
    pub fn to_completion_request(&self) -> CompletionRequest {
        CompletionRequest {
            model: self.request.model.clone(),
            messages: self.messages.clone(),
            sampling: self.request.sampling(),
            tools: self.tools.clone(),
            user: self.request.user_id.clone(),
        }
    }
}

/// A resolved conversation and the backend's reply to it.
#[derive(Debug, Clone)]
pub struct Completion {
    pub resolved: ResolvedRequest,
    pub text: String,
}

pub struct DirectiveEngine {
    settings: EngineSettings,
    registry: ResolverRegistry,
    alias: ModelAliasResolver,
    tools: Arc<dyn ToolCatalog>,
}

impl DirectiveEngine {
    /// An engine with the standard resolver set.
    pub fn new(settings: EngineSettings, store: Arc<dyn CommandStore>, tools: Arc<dyn ToolCatalog>) -> Self {
        let registry = standard_registry(settings.catalog.clone(), settings.predefined.clone(), store);
        Self::with_registry(settings, registry, tools)
    }

    pub fn with_registry(settings: EngineSettings, registry: ResolverRegistry, tools: Arc<dyn ToolCatalog>) -> Self {
        let alias = ModelAliasResolver::new(settings.catalog.clone());
        Self {
            settings,
            registry,
            alias,
            tools,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Resolve `turns` (oldest first, current turn last) for `user_id`.
    pub fn resolve(&self, turns: &[Turn], user_id: Option<&str>) -> ResolvedRequest {
        self.resolve_at(turns, user_id, Utc::now())
    }

    /// [`resolve`](Self::resolve) with a fixed clock for the preamble.
    pub fn resolve_at(&self, turns: &[Turn], user_id: Option<&str>, now: DateTime<Utc>) -> ResolvedRequest {
        let mut diagnostics = Vec::new();
        let mut messages = Vec::with_capacity(turns.len() + 1);
        let mut carried: Option<SystemMessageBuilder> = None;

        let (current, history) = match turns.split_last() {
            Some((last, rest)) => (Some(last), rest),
            None => (None, turns),
        };

        for (index, turn) in history.iter().enumerate() {
            let author = if turn.author_id.is_empty() {
                user_id
            } else {
                Some(turn.author_id.as_str())
            };
            let replayed = self.resolve_text(&turn.text, author, index, &mut diagnostics);

            match replayed.system.context_status() {
                ContextStatus::Set => carried = Some(replayed.system.clone()),
                ContextStatus::Cleared => carried = None,
                ContextStatus::None => {}
            }
            messages.push(ChatMessage::new(turn.role, replayed.prompt));
        }

        let mut request = match current {
            Some(turn) => {
                let request = self.resolve_text(&turn.text, user_id, history.len(), &mut diagnostics);
                messages.push(ChatMessage::new(turn.role, request.prompt.clone()));
                request
            }
            None => self.new_request(String::new(), user_id),
        };

        if let Some(context) = carried {
            let system = &request.system;
            if !system.is_modified() && system.context_status() != ContextStatus::Cleared {
                debug!("Applying carried context to current turn");
                request.system = context;
            }
        }

        let system_message = request.system.build(&self.render_preamble(now));
        messages.insert(0, ChatMessage::system(system_message.clone()));

        let tools = match self.tools.list() {
            Ok(catalog) => ToolMatcher::select(&request, &catalog),
            Err(e) => {
                warn!(error = %e, "Tool catalog unavailable, sending no tools");
                diagnostics.push(Diagnostic {
                    turn: None,
                    kind: DiagnosticKind::ToolCatalog,
                    message: e.to_string(),
                });
                Vec::new()
            }
        };

        info!(
            turns = turns.len(),
            model = %request.model,
            tools = tools.len(),
            diagnostics = diagnostics.len(),
            "Resolved conversation"
        );

        ResolvedRequest {
            request,
            system_message,
            messages,
            tools,
            diagnostics,
        }
    }

    /// Resolve the conversation and submit it to `backend`.
    pub async fn complete(
        &self,
        backend: &dyn CompletionBackend,
        turns: &[Turn],
        user_id: Option<&str>,
    ) -> Result<Completion, BackendError> {
        let resolved = self.resolve(turns, user_id);
        let request = resolved.to_completion_request();
        debug!(backend = backend.name(), model = %request.model, "Submitting completion");
        let text = backend.submit(&request).await?;
        Ok(Completion { resolved, text })
    }

    fn new_request(&self, prompt: String, user_id: Option<&str>) -> GenerationRequest {
        GenerationRequest::from_defaults(&self.settings.defaults, prompt).with_user(user_id.map(str::to_string))
    }

    /// One text through model-word selection and the directive pass.
    fn resolve_text(
        &self,
        text: &str,
        user_id: Option<&str>,
        turn: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> GenerationRequest {
        let mut request = self.new_request(text.to_string(), user_id);
        self.alias.apply(&mut request);
        let outcome = resolve_directives(&self.registry, &mut request);
        if let Some(halt) = outcome.halt {
            diagnostics.push(Diagnostic::for_turn(turn, &halt));
        }
        request.prompt = request.prompt.trim().to_string();
        request
    }

    fn render_preamble(&self, now: DateTime<Utc>) -> String {
        self.settings
            .preamble
            .replace(TODAY_PLACEHOLDER, &now.format(TODAY_FORMAT).to_string())
    }
}
