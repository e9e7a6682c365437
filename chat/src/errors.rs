//! Error types for the chat service

use thiserror::Error;

/// Main error type for the chat service
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The request was rejected before any external call was made
    #[error("{0}")]
    InputError(String),

    /// The completion call itself failed
    #[error("Generation error: {0}")]
    GenerationError(String),

    /// The reply could not be read as a workflow payload
    #[error("Parse error: {0}")]
    ParseError(String),

    /// An operation entry had an unknown tag or a missing field
    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Shutdown error: {0}")]
    ShutdownError(String),
}
