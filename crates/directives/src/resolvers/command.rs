use std::sync::Arc;

use flagline_core::command::{Command, CommandStore};
use flagline_core::request::GenerationRequest;
use tracing::warn;

use crate::ResolveError;
use crate::resolver::Resolver;
use crate::scanner::Directive;

/// Expand a command into the request. Only the command name is trimmed.
fn apply(command: &Command, request: &mut GenerationRequest, directive: &mut Directive) {
    if command.as_system {
        request.system.append(command.prompt.clone());
    } else {
        request.prompt = format!("{}\n{}", command.prompt, request.prompt);
    }
    directive.has_value = false;
}

/// Commands compiled into the configuration.
pub struct PredefinedCommandResolver {
    commands: Vec<Command>,
}

impl PredefinedCommandResolver {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    fn find(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.is_named(name))
    }
}

impl Resolver for PredefinedCommandResolver {
    fn name(&self) -> &str {
        "-command"
    }

    fn can_handle(&self, directive: &Directive) -> bool {
        self.find(&directive.name).is_some()
    }

    fn resolve(&self, request: &mut GenerationRequest, directive: &mut Directive) -> Result<(), ResolveError> {
        if let Some(command) = self.find(&directive.name) {
            apply(command, request, directive);
        }
        Ok(())
    }
}

/// Commands users saved in the external store.
///
/// A failing store cannot rule the name out, so `can_handle` accepts it and
/// `resolve` reports the store error, which halts scanning.
pub struct UserCommandResolver {
    store: Arc<dyn CommandStore>,
}

impl UserCommandResolver {
    pub fn new(store: Arc<dyn CommandStore>) -> Self {
        Self { store }
    }
}

impl Resolver for UserCommandResolver {
    fn name(&self) -> &str {
        "-userCommand"
    }

    fn can_handle(&self, directive: &Directive) -> bool {
        !matches!(
            self.store.lookup(&directive.name, directive.user_id.as_deref()),
            Ok(None)
        )
    }

    fn resolve(&self, request: &mut GenerationRequest, directive: &mut Directive) -> Result<(), ResolveError> {
        let found = self
            .store
            .lookup(&directive.name, directive.user_id.as_deref())
            .map_err(|source| {
                warn!(store = self.store.name(), command = %directive.name, error = %source, "Command lookup failed");
                ResolveError::CommandStore {
                    name: directive.name.clone(),
                    source,
                }
            })?;
        if let Some(command) = found {
            apply(&command, request, directive);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagline_core::command::select_scoped;
    use flagline_core::error::CommandStoreError;
    use flagline_core::request::GenerationDefaults;

    struct VecStore(Vec<Command>);

    impl CommandStore for VecStore {
        fn name(&self) -> &str {
            "vec"
        }
        fn lookup(&self, name: &str, user_id: Option<&str>) -> Result<Option<Command>, CommandStoreError> {
            Ok(select_scoped(self.0.iter().filter(|c| c.is_named(name)), user_id).cloned())
        }
    }

    struct BrokenStore;

    impl CommandStore for BrokenStore {
        fn name(&self) -> &str {
            "broken"
        }
        fn lookup(&self, _name: &str, _user_id: Option<&str>) -> Result<Option<Command>, CommandStoreError> {
            Err(CommandStoreError::Unavailable("connection refused".into()))
        }
    }

    fn request(prompt: &str) -> GenerationRequest {
        GenerationRequest::from_defaults(&GenerationDefaults::default(), prompt)
    }

    #[test]
    fn predefined_prompt_command_prefixes_prompt() {
        let r = PredefinedCommandResolver::new(vec![Command::new("-command", "This is a command body")]);
        let mut req = request("-command How's the weather?");
        let mut d = Directive::new("-Command", "How's");
        assert!(r.can_handle(&d));
        r.resolve(&mut req, &mut d).unwrap();
        assert_eq!(req.prompt, "This is a command body\n-command How's the weather?");
        assert!(!d.has_value);
    }

    #[test]
    fn predefined_system_command_appends_fragment() {
        let r = PredefinedCommandResolver::new(vec![Command::new("-command-sys", "System body").as_system()]);
        let mut req = request("-command-sys hi");
        let mut d = Directive::new("-command-sys", "hi");
        r.resolve(&mut req, &mut d).unwrap();
        assert_eq!(req.prompt, "-command-sys hi");
        assert_eq!(req.system.fragments(), ["System body".to_string()]);
        assert!(!req.system.is_modified());
    }

    #[test]
    fn predefined_requires_exact_name() {
        let r = PredefinedCommandResolver::new(vec![Command::new("-command", "x")]);
        assert!(!r.can_handle(&Directive::new("-commands", "")));
    }

    #[test]
    fn user_command_scoped_to_owner() {
        let store = Arc::new(VecStore(vec![Command::new("-mine", "private").owned_by("U1")]));
        let r = UserCommandResolver::new(store);
        assert!(r.can_handle(&Directive::new("-mine", "").with_user(Some("U1"))));
        assert!(!r.can_handle(&Directive::new("-mine", "").with_user(Some("U2"))));
    }

    #[test]
    fn store_failure_surfaces_as_error() {
        let r = UserCommandResolver::new(Arc::new(BrokenStore));
        let mut d = Directive::new("-anything", "");
        assert!(r.can_handle(&d));
        let mut req = request("-anything hi");
        let err = r.resolve(&mut req, &mut d).unwrap_err();
        assert!(matches!(err, ResolveError::CommandStore { .. }));
        assert_eq!(req.prompt, "-anything hi");
    }
}
