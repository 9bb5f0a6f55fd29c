//! Error types for the console.

use crm_filter_core::error::Error as EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid JSON in '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("{0}")]
    Engine(#[from] EngineError),
}
