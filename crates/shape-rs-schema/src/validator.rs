//! Recursive validation of config values against a schema.

use crate::path::PathContext;
use crate::schema::{ObjectShape, PrimitiveKind, Schema};
use crate::validated::{Validated, ValidatedObject};
use crate::ValidationError;
use indexmap::IndexMap;
use log::trace;
use serde_json::{Map, Value};

/// Validate `value` against `schema` with an unlabeled root path.
///
/// `None` stands for an absent value, which is distinct from JSON `null`.
pub fn validate(value: Option<&Value>, schema: &Schema) -> Result<Validated, ValidationError> {
    validate_at(value, schema, &PathContext::root())
}

/// Validate `value` against `schema`, rendering error locations under `path`.
///
/// The walk is fail-fast: the first violation aborts the whole validation.
pub fn validate_at(
    value: Option<&Value>,
    schema: &Schema,
    path: &PathContext,
) -> Result<Validated, ValidationError> {
    trace!("validating {path} against {} schema", schema.kind_name());
    match schema {
        Schema::Primitive(kind) => {
            expect_primitive(value, *kind, path).map(|value| Validated::Value(value.clone()))
        }
        Schema::ArrayOf(element) => validate_array(value, element, path),
        Schema::Object(shape) => validate_object(value, shape, path),
        Schema::Literal(literal) => match value {
            None => Ok(Validated::Value(literal.to_value())),
            Some(_) => expect_primitive(value, literal.kind(), path)
                .map(|value| Validated::Value(value.clone())),
        },
        Schema::Predicate(predicate) => {
            if predicate.accepts(value) {
                Ok(value.cloned().map_or(Validated::Absent, Validated::Value))
            } else {
                Err(invalid_setting(path, predicate.label()))
            }
        }
    }
}

/// Require a present value of exactly `kind`.
fn expect_primitive<'a>(
    value: Option<&'a Value>,
    kind: PrimitiveKind,
    path: &PathContext,
) -> Result<&'a Value, ValidationError> {
    let Some(value) = value else {
        return Err(ValidationError::MissingSetting {
            path: path.to_string(),
        });
    };
    if kind.matches(value) {
        Ok(value)
    } else {
        Err(invalid_setting(path, kind.name()))
    }
}

/// Validate every element against `element`; elements share the array's path.
fn validate_array(
    value: Option<&Value>,
    element: &Schema,
    path: &PathContext,
) -> Result<Validated, ValidationError> {
    let Some(Value::Array(items)) = value else {
        return Err(invalid_setting(path, "array"));
    };
    items
        .iter()
        .map(|item| validate_at(Some(item), element, path))
        .collect::<Result<Vec<_>, _>>()
        .map(Validated::Array)
}

/// Validate declared keys in declaration order, then reject undeclared ones.
///
/// A value that is absent or not an object is read as an empty object, so
/// sections made only of defaults can be omitted entirely.
fn validate_object(
    value: Option<&Value>,
    shape: &ObjectShape,
    path: &PathContext,
) -> Result<Validated, ValidationError> {
    let map = value.and_then(Value::as_object);
    let mut fields = IndexMap::with_capacity(shape.len());
    for (key, schema) in shape.iter() {
        let child = validate_at(map.and_then(|map| map.get(key)), schema, &path.child(key))?;
        fields.insert(key.to_string(), child);
    }

    if let Some(map) = map {
        ensure_declared_keys(map, shape, path)?;
    }

    Ok(Validated::Object(ValidatedObject::new(fields)))
}

/// Reject the first key (in document order) the shape does not declare.
fn ensure_declared_keys(
    map: &Map<String, Value>,
    shape: &ObjectShape,
    path: &PathContext,
) -> Result<(), ValidationError> {
    match map.keys().find(|key| !shape.contains_key(key)) {
        Some(key) => Err(ValidationError::UnknownSetting {
            path: path.child(key).to_string(),
            key: key.clone(),
        }),
        None => Ok(()),
    }
}

fn invalid_setting(path: &PathContext, expected: &str) -> ValidationError {
    ValidationError::InvalidSetting {
        path: path.to_string(),
        expected: expected.to_string(),
    }
}
