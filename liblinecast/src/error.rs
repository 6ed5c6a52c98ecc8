//! Error types for Linecast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinecastError>;

#[derive(Error, Debug)]
pub enum LinecastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("No content available: {0}")]
    ContentUnavailable(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Coarse classification of a failed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigMissing,
    ContentUnavailable,
    TransportFailure,
    InvalidInput,
}

impl LinecastError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LinecastError::Config(_) => ErrorKind::ConfigMissing,
            LinecastError::Content(_) | LinecastError::ContentUnavailable(_) => {
                ErrorKind::ContentUnavailable
            }
            LinecastError::Transport(_) => ErrorKind::TransportFailure,
            LinecastError::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::TransportFailure => 1,
            ErrorKind::ConfigMissing => 2,
            ErrorKind::ContentUnavailable => 3,
            ErrorKind::InvalidInput => 4,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("{var} is not set. Suggestion: export {var}='<your channel access token>' and run again.")]
    MissingCredential { var: String },
}

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse content file {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("Failed to read content file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Broadcast rejected with HTTP {status}: {body}")]
    Status { status: u16, body: String },
}
