//! Declarative config schemas and the recursive validator.
//!
//! A [`Schema`] describes the expected shape of a config value: primitive
//! kinds, literal defaults, arrays, nested objects and custom predicates.
//! [`validate`] walks a value and its schema in lock-step and produces a
//! [`Validated`] tree with defaults filled in, or a [`ValidationError`]
//! naming the offending setting.

mod error;
mod path;
mod schema;
mod validated;
mod validator;

/// Error type returned by schema construction and validation.
pub use error::ValidationError;
/// Location rendering for error messages.
pub use path::PathContext;
/// Schema dialect types.
pub use schema::{Literal, ObjectShape, Predicate, PrimitiveKind, Schema};
/// Validated config trees.
pub use validated::{Validated, ValidatedObject};
/// Validation entry points.
pub use validator::{validate, validate_at};
