//! Error types for schema validation.

use thiserror::Error;

/// Errors returned while validating a config value against a schema.
///
/// Every variant carries the rendered location of the offending setting so
/// failures can be traced back to the document without a debugger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required setting is absent.
    #[error("missing configuration setting in {path}")]
    MissingSetting { path: String },
    /// A present setting has the wrong kind or was rejected by a predicate.
    #[error("invalid configuration setting in {path}: expected {expected}")]
    InvalidSetting { path: String, expected: String },
    /// The config contains a key the object schema does not declare.
    #[error("unknown configuration setting {path}")]
    UnknownSetting { path: String, key: String },
    /// The schema itself is not a recognized shape.
    #[error("unknown configuration schema in {path}: {message}")]
    UnknownSchema { path: String, message: String },
}

impl ValidationError {
    /// Rendered location of the failure; for `UnknownSetting` it ends with the
    /// unknown key.
    pub fn path(&self) -> &str {
        match self {
            Self::MissingSetting { path }
            | Self::InvalidSetting { path, .. }
            | Self::UnknownSetting { path, .. }
            | Self::UnknownSchema { path, .. } => path,
        }
    }
}
