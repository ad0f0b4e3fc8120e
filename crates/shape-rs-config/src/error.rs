//! Error types for config loading.

use shape_rs_schema::ValidationError;
use thiserror::Error;

/// Errors returned while acquiring, parsing or validating a config document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a config document failed for a reason other than absence.
    #[error("failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// A custom document store failed.
    #[error("failed to read config from store: {0}")]
    StoreFailed(String),
    /// The document is not valid UTF-8.
    #[error("failed to decode config: {0}")]
    DecodeFailed(#[from] std::string::FromUtf8Error),
    /// Parsing a JSON document failed.
    #[error("failed to parse config: {0}")]
    ParseFailed(#[from] serde_json::Error),
    /// Parsing a JSON5 document failed.
    #[error("failed to parse config: {0}")]
    Json5ParseFailed(#[from] json5::Error),
    /// The document does not match the schema.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl ConfigError {
    /// Whether the document existed but could not be parsed.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseFailed(_) | Self::Json5ParseFailed(_))
    }

    /// The schema violation, when this is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}
