//! Schema dialect for declarative configuration validation.
//!
//! A schema is authored once as a [`Schema`] tree and then used to validate
//! any number of config values. The JSON rendition of the dialect (objects,
//! single-element arrays and bare literals) can be lifted into a schema with
//! [`Schema::from_json`].

use crate::ValidationError;
use crate::path::PathContext;
use indexmap::IndexMap;
use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;

/// Primitive JSON kinds a setting can be required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
}

impl PrimitiveKind {
    /// Whether `value` is exactly this kind. `null` never matches.
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::String, Value::String(_))
                | (Self::Number, Value::Number(_))
                | (Self::Boolean, Value::Bool(_))
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A default value embedded in a schema.
///
/// The literal doubles as a type constraint: a present value must have the
/// literal's primitive kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(Number),
    Boolean(bool),
}

impl Literal {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::String(_) => PrimitiveKind::String,
            Self::Number(_) => PrimitiveKind::Number,
            Self::Boolean(_) => PrimitiveKind::Boolean,
        }
    }

    /// The default as a config value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(value) => Value::String(value.clone()),
            Self::Number(value) => Value::Number(value.clone()),
            Self::Boolean(value) => Value::Bool(*value),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

macro_rules! literal_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Self::Number(Number::from(value))
                }
            }

            impl From<$ty> for Schema {
                fn from(value: $ty) -> Self {
                    Self::Literal(Literal::from(value))
                }
            }
        )*
    };
}

literal_from_integer!(i32, i64, u32, u64);

impl TryFrom<f64> for Literal {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Number::from_f64(value)
            .map(Self::Number)
            .ok_or_else(|| ValidationError::UnknownSchema {
                path: PathContext::root().to_string(),
                message: format!("number literal {value} is not finite"),
            })
    }
}

type PredicateFn = dyn Fn(Option<&Value>) -> bool + Send + Sync;

/// Opaque acceptance check over a (possibly absent) config value.
#[derive(Clone)]
pub struct Predicate {
    label: String,
    check: Arc<PredicateFn>,
}

impl Predicate {
    /// Wrap `check`; `label` describes what the check expects and shows up in
    /// error messages.
    pub fn new<F>(label: impl Into<String>, check: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            check: Arc::new(check),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn accepts(&self, value: Option<&Value>) -> bool {
        (self.check)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Declared fields of an object schema, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ObjectShape {
    fields: IndexMap<String, Schema>,
}

impl ObjectShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `key`, replacing any earlier declaration in place.
    pub fn field(mut self, key: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.insert(key, schema);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, schema: impl Into<Schema>) {
        self.fields.insert(key.into(), schema.into());
    }

    pub fn get(&self, key: &str) -> Option<&Schema> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.fields.iter().map(|(key, schema)| (key.as_str(), schema))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Schema)> for ObjectShape {
    fn from_iter<I: IntoIterator<Item = (K, Schema)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, schema)| (key.into(), schema))
                .collect(),
        }
    }
}

/// Declarative description of an expected config shape.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Value must be present and of this primitive kind.
    Primitive(PrimitiveKind),
    /// Default used when the value is absent; otherwise a kind constraint.
    Literal(Literal),
    /// Value must be an array whose elements all match the inner schema.
    ArrayOf(Box<Schema>),
    /// Value is a structured object with exactly the declared keys.
    Object(ObjectShape),
    /// Value is accepted unchanged when the predicate holds.
    Predicate(Predicate),
}

impl Schema {
    pub fn string() -> Self {
        Self::Primitive(PrimitiveKind::String)
    }

    pub fn number() -> Self {
        Self::Primitive(PrimitiveKind::Number)
    }

    pub fn boolean() -> Self {
        Self::Primitive(PrimitiveKind::Boolean)
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        Self::Literal(value.into())
    }

    pub fn array_of(element: impl Into<Schema>) -> Self {
        Self::ArrayOf(Box::new(element.into()))
    }

    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self::Object(fields.into_iter().collect())
    }

    pub fn predicate<F>(label: impl Into<String>, check: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Predicate::new(label, check))
    }

    /// Short description of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Primitive(kind) => kind.name(),
            Self::Literal(literal) => literal.kind().name(),
            Self::ArrayOf(_) => "array",
            Self::Object(_) => "object",
            Self::Predicate(predicate) => predicate.label(),
        }
    }

    /// Build a schema from its JSON rendition.
    ///
    /// Objects become object shapes, single-element arrays become array
    /// schemas and strings, numbers and booleans become literal defaults.
    /// Anything else is rejected with [`ValidationError::UnknownSchema`].
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        schema_from_json(value, &PathContext::labeled("[schema]:"))
    }
}

impl From<ObjectShape> for Schema {
    fn from(shape: ObjectShape) -> Self {
        Self::Object(shape)
    }
}

impl From<PrimitiveKind> for Schema {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

impl From<Literal> for Schema {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Predicate> for Schema {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

impl From<&str> for Schema {
    fn from(value: &str) -> Self {
        Self::Literal(value.into())
    }
}

impl From<String> for Schema {
    fn from(value: String) -> Self {
        Self::Literal(value.into())
    }
}

impl From<bool> for Schema {
    fn from(value: bool) -> Self {
        Self::Literal(value.into())
    }
}

impl TryFrom<f64> for Schema {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Literal::try_from(value).map(Self::Literal)
    }
}

fn schema_from_json(value: &Value, path: &PathContext) -> Result<Schema, ValidationError> {
    match value {
        Value::String(value) => Ok(Schema::literal(value.as_str())),
        Value::Number(value) => Ok(Schema::Literal(Literal::Number(value.clone()))),
        Value::Bool(value) => Ok(Schema::literal(*value)),
        Value::Array(items) => match items.as_slice() {
            [element] => Ok(Schema::array_of(schema_from_json(element, path)?)),
            _ => Err(unknown_schema(
                path,
                &format!("expected single-element array, found {} elements", items.len()),
            )),
        },
        Value::Object(map) => {
            let mut shape = ObjectShape::new();
            for (key, value) in map {
                shape.insert(key.as_str(), schema_from_json(value, &path.child(key))?);
            }
            Ok(Schema::Object(shape))
        }
        Value::Null => Err(unknown_schema(path, "null is not a schema")),
    }
}

fn unknown_schema(path: &PathContext, message: &str) -> ValidationError {
    ValidationError::UnknownSchema {
        path: path.to_string(),
        message: message.to_string(),
    }
}
