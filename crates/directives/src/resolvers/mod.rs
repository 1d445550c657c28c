//! Built-in resolvers and the standard precedence order.

mod command;
mod context;
mod model;
mod numeric;
mod system;
mod tools;

pub use command::{PredefinedCommandResolver, UserCommandResolver};
pub use context::{CONTEXT_CLEAR_VALUES, ContextResolver};
pub use model::ModelResolver;
pub use numeric::{NumericField, NumericResolver, sanitize_number};
pub use system::SystemResolver;
pub use tools::{NoToolsResolver, ToolInclusionResolver};

use std::sync::Arc;

use flagline_core::command::{Command, CommandStore};
use flagline_core::model::ModelCatalog;

use crate::resolver::ResolverRegistry;

/// The registry used by the engine, in precedence order:
/// model, sampling parameters, system, context, predefined commands,
/// user commands, tool inclusion, tool disabling.
pub fn standard_registry(
    catalog: Arc<ModelCatalog>,
    predefined: Vec<Command>,
    store: Arc<dyn CommandStore>,
) -> ResolverRegistry {
    ResolverRegistry::new()
        .with(Box::new(ModelResolver::new(catalog)))
        .with(Box::new(NumericResolver::max_tokens()))
        .with(Box::new(NumericResolver::temperature()))
        .with(Box::new(NumericResolver::top_p()))
        .with(Box::new(NumericResolver::presence_penalty()))
        .with(Box::new(NumericResolver::frequency_penalty()))
        .with(Box::new(SystemResolver))
        .with(Box::new(ContextResolver))
        .with(Box::new(PredefinedCommandResolver::new(predefined)))
        .with(Box::new(UserCommandResolver::new(store)))
        .with(Box::new(ToolInclusionResolver))
        .with(Box::new(NoToolsResolver))
}
