//! Public surface for shape.
//!
//! Re-exports the schema dialect, the validator and the document loader and
//! provides a small initialization helper to keep consumer setup consistent.

/// Re-export for convenience.
pub use shape_rs_config as config;
/// Re-export for convenience.
pub use shape_rs_schema as schema;

pub use shape_rs_config::{
    ConfigError, DocumentFormat, DocumentStore, FsDocumentStore, Loader, LoaderOptions, open,
};
pub use shape_rs_schema::{
    Literal, ObjectShape, PathContext, Predicate, PrimitiveKind, Schema, Validated,
    ValidatedObject, ValidationError, validate, validate_at,
};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::builder()
            .format_timestamp_millis()
            .parse_default_env()
            .try_init();
    }
    log::debug!("shape logging initialized");
}
