//! Error types for the Flagline domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each collaborator has its own error type; the directive engine itself
//! reports halts as diagnostics rather than errors.

use thiserror::Error;

/// The top-level error type for Flagline operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Collaborator errors ---
    #[error("Command store error: {0}")]
    CommandStore(#[from] CommandStoreError),

    #[error("Tool catalog error: {0}")]
    ToolCatalog(#[from] ToolCatalogError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Collaborator errors ---

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandStoreError {
    #[error("Command store unavailable: {0}")]
    Unavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid command '{name}': {reason}")]
    InvalidCommand { name: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolCatalogError {
    #[error("Tool catalog unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}
