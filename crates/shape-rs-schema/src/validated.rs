//! Validated configuration trees.
//!
//! Nested objects produced by an object schema are read through the object
//! that encloses them. Reading a key a nested object does not set falls back
//! to the enclosing object, so a default declared once at an outer level
//! applies to every inner section that does not override it.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Result of validating a config value against a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated {
    /// Absent value accepted by a predicate.
    Absent,
    /// Primitive, defaulted literal or predicate-accepted value.
    Value(Value),
    /// Freshly built array of validated elements.
    Array(Vec<Validated>),
    /// Freshly built object holding exactly the declared keys.
    Object(Arc<ValidatedObject>),
}

impl Validated {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_value().and_then(Value::as_bool)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_value().and_then(Value::as_f64)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_value().and_then(Value::as_i64)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_value().and_then(Value::as_u64)
    }

    pub fn as_array(&self) -> Option<&[Validated]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Arc<ValidatedObject>> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Chained lookup of `key` when this is an object; `None` otherwise.
    pub fn get(&self, key: &str) -> Option<Validated> {
        self.as_object().and_then(|object| object.get(key))
    }

    /// Plain JSON rendition with inheritance stripped.
    ///
    /// Objects contain their own keys only and absent entries are dropped.
    /// Returns `None` for [`Validated::Absent`].
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::Absent => None,
            Self::Value(value) => Some(value.clone()),
            Self::Array(items) => Some(Value::Array(
                items
                    .iter()
                    .map(|item| item.to_value().unwrap_or(Value::Null))
                    .collect(),
            )),
            Self::Object(object) => {
                let map = object
                    .fields
                    .iter()
                    .filter_map(|(key, value)| Some((key.clone(), value.to_value()?)))
                    .collect::<Map<String, Value>>();
                Some(Value::Object(map))
            }
        }
    }

    /// JSON rendition where every object also carries the settings it
    /// inherits from enclosing objects.
    ///
    /// Inherited values that are themselves objects are enclosing sections
    /// rather than settings and are left out.
    pub fn to_resolved_value(&self) -> Option<Value> {
        match self {
            Self::Object(object) => Some(Value::Object(object.resolved())),
            Self::Array(items) => Some(Value::Array(
                items
                    .iter()
                    .map(|item| item.to_resolved_value().unwrap_or(Value::Null))
                    .collect(),
            )),
            other => other.to_value(),
        }
    }

    /// Deserialize the resolved rendition into a typed config struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_resolved_value().unwrap_or(Value::Null))
    }
}

impl From<Value> for Validated {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl Serialize for Validated {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Value(value) => value.serialize(serializer),
            Self::Array(items) => items.serialize(serializer),
            Self::Object(object) => object.serialize(serializer),
        }
    }
}

/// Validated object with a fallback link to its enclosing object.
///
/// Nested objects are stored unlinked. Reading one through [`get`] hands out
/// a handle that holds its enclosing handle, so the chain stays alive for as
/// long as the section does, even after the root is dropped.
///
/// [`get`]: ValidatedObject::get
pub struct ValidatedObject {
    fields: Arc<IndexMap<String, Validated>>,
    parent: Option<Arc<ValidatedObject>>,
}

impl ValidatedObject {
    /// Freeze `fields` into an unlinked object.
    pub(crate) fn new(fields: IndexMap<String, Validated>) -> Arc<Self> {
        Arc::new(Self {
            fields: Arc::new(fields),
            parent: None,
        })
    }

    /// Look up `key` on this object, then along the chain of enclosing
    /// objects up to the root.
    ///
    /// A declared key whose value is absent shadows the chain. Objects are
    /// returned linked to the object that declares them.
    pub fn get(self: &Arc<Self>, key: &str) -> Option<Validated> {
        match self.fields.get(key) {
            Some(Validated::Absent) => None,
            Some(value) => Some(self.linked(value)),
            None => self.parent.as_ref()?.get(key),
        }
    }

    /// Own field only, without falling back to enclosing objects.
    pub fn get_own(self: &Arc<Self>, key: &str) -> Option<Validated> {
        self.fields.get(key).map(|value| self.linked(value))
    }

    /// Enclosing object, if this object was read out of one.
    pub fn parent(&self) -> Option<&Arc<ValidatedObject>> {
        self.parent.as_ref()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(self: &Arc<Self>) -> impl Iterator<Item = (&str, Validated)> {
        self.fields
            .iter()
            .map(move |(key, value)| (key.as_str(), self.linked(value)))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Hand out an own field; nested objects get `self` as their parent.
    fn linked(self: &Arc<Self>, value: &Validated) -> Validated {
        match value {
            Validated::Object(child) => Validated::Object(Arc::new(Self {
                fields: Arc::clone(&child.fields),
                parent: Some(Arc::clone(self)),
            })),
            other => other.clone(),
        }
    }

    fn resolved(self: &Arc<Self>) -> Map<String, Value> {
        let mut map = Map::new();
        for (key, value) in self.iter() {
            if let Some(value) = value.to_resolved_value() {
                map.insert(key.to_string(), value);
            }
        }

        let mut shadowed: HashSet<&str> = self.keys().collect();
        let mut ancestor = self.parent();
        while let Some(object) = ancestor {
            for (key, value) in object.fields.iter() {
                if !shadowed.insert(key.as_str()) {
                    continue;
                }
                if matches!(value, Validated::Object(_) | Validated::Absent) {
                    continue;
                }
                if let Some(value) = value.to_resolved_value() {
                    map.insert(key.clone(), value);
                }
            }
            ancestor = object.parent();
        }
        map
    }
}

impl PartialEq for ValidatedObject {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl fmt::Debug for ValidatedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedObject")
            .field("fields", &self.fields)
            .field("linked", &self.parent.is_some())
            .finish()
    }
}

impl Serialize for ValidatedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.fields.values().filter(|value| !value.is_absent()).count();
        let mut map = serializer.serialize_map(Some(present))?;
        for (key, value) in self.fields.iter() {
            if !value.is_absent() {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}
