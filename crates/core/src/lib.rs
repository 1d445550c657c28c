//! # Flagline Core
//!
//! Domain types, collaborator traits, and error definitions for the Flagline
//! request-preparation engine. The engine itself lives in
//! `flagline-directives`; this crate only defines what flows through it.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (command store, tool catalog, completion
//! backend) is a trait here. Implementations live elsewhere, which keeps
//! the engine testable with in-memory stand-ins.

pub mod backend;
pub mod command;
pub mod error;
pub mod message;
pub mod model;
pub mod request;
pub mod system;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use backend::{CompletionBackend, CompletionRequest};
pub use command::{Command, CommandStore, NoCommands};
pub use error::{BackendError, CommandStoreError, Error, Result, ToolCatalogError};
pub use message::{ChatMessage, Role, Turn};
pub use model::{ModelCatalog, ModelInfo};
pub use request::{GenerationDefaults, GenerationRequest, SamplingParams};
pub use system::{ContextStatus, SystemMessageBuilder};
pub use tool::{StaticToolCatalog, ToolCatalog, ToolDescriptor};
