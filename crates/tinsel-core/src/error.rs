//! Error types for Tinsel

use thiserror::Error;

/// The main error type for Tinsel operations
#[derive(Debug, Error)]
pub enum TinselError {
    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Asset error: {0}")]
    Asset(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Tinsel operations
pub type Result<T> = std::result::Result<T, TinselError>;
