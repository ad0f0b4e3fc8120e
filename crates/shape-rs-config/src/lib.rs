//! Config document loading on top of the shape schema validator.
//!
//! This crate owns document acquisition (through a pluggable store),
//! JSON/JSON5 parsing, layered merging and the `open` entry point that
//! hands the parsed value to [`shape_rs_schema::validate_at`].

mod error;
mod loader;

/// Public error type returned by config loading APIs.
pub use error::ConfigError;
/// Loader, stores and options.
pub use loader::{
    DEFAULT_PLACEHOLDER_LABEL, DocumentFormat, DocumentStore, FsDocumentStore, Loader,
    LoaderOptions, open, parse_document,
};
