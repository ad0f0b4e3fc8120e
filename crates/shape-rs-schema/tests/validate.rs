//! Validator behavior across every schema variant.

use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{Value, json};
use shape_rs_schema::{
    ObjectShape, PathContext, Schema, Validated, ValidationError, validate, validate_at,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Primitive markers return the value unchanged when the kind matches.
#[test]
fn primitive_returns_matching_value() {
    assert_eq!(
        validate(Some(&json!(true)), &Schema::boolean()).expect("bool"),
        Validated::Value(json!(true))
    );
    assert_eq!(
        validate(Some(&json!(42)), &Schema::number()).expect("number"),
        Validated::Value(json!(42))
    );
    assert_eq!(
        validate(Some(&json!("foo bar")), &Schema::string()).expect("string"),
        Validated::Value(json!("foo bar"))
    );
}

/// Primitive markers reject absent values and every other kind.
#[test]
fn primitive_rejects_absent_and_mismatched_kinds() {
    let err = validate(None, &Schema::boolean()).unwrap_err();
    assert!(matches!(err, ValidationError::MissingSetting { .. }));

    for value in [json!(null), json!(42), json!("foo"), json!({}), json!([true])] {
        let err = validate(Some(&value), &Schema::boolean()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSetting { .. }), "{value}");
    }
    for value in [json!(null), json!(true), json!("42"), json!([42])] {
        assert!(validate(Some(&value), &Schema::number()).is_err(), "{value}");
    }
    for value in [json!(null), json!(true), json!(42), json!({ "toString": "foo" })] {
        assert!(validate(Some(&value), &Schema::string()).is_err(), "{value}");
    }
}

/// Literal schemas default absent values and otherwise constrain the kind.
#[test]
fn literal_defaults_and_constrains() {
    let cases = [
        (Schema::from(false), json!(false), json!(true), json!(0)),
        (Schema::from("foo bar"), json!("foo bar"), json!("foo"), json!(false)),
        (Schema::from(42), json!(42), json!(23), json!("")),
    ];

    for (schema, default, present, wrong) in cases {
        assert_eq!(
            validate(None, &schema).expect("default"),
            Validated::Value(default)
        );
        assert_eq!(
            validate(Some(&present), &schema).expect("present"),
            Validated::Value(present.clone())
        );
        assert!(validate(Some(&json!(null)), &schema).is_err());
        assert!(matches!(
            validate(Some(&wrong), &schema),
            Err(ValidationError::InvalidSetting { .. })
        ));
    }
}

/// Array schemas build a fresh array of validated elements.
#[test]
fn array_returns_validated_copy() {
    let values = json!(["foo", "bar", "baz"]);
    let validated = validate(Some(&values), &Schema::array_of(Schema::string())).expect("array");
    assert_eq!(validated.as_array().map(<[Validated]>::len), Some(3));
    assert_eq!(validated.to_value(), Some(values));
}

/// The first bad element fails the whole array.
#[test]
fn array_rejects_invalid_element() {
    let schema = Schema::array_of(Schema::string());
    let err = validate(Some(&json!(["x", 42, "y"])), &schema).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidSetting { .. }));

    assert!(validate(None, &schema).is_err());
    assert!(validate(Some(&json!("x")), &schema).is_err());
    assert!(validate(Some(&json!({ "0": "x" })), &schema).is_err());
}

/// Element errors reuse the array's own path, without an index segment.
#[test]
fn array_element_errors_use_array_path() {
    let schema = Schema::object([("hosts", Schema::array_of(Schema::string()))]);
    let err = validate_at(
        Some(&json!({ "hosts": ["a", 1] })),
        &schema,
        &PathContext::labeled("app.json:"),
    )
    .unwrap_err();
    assert_eq!(err.path(), "app.json:.hosts");
}

/// Object schemas copy declared keys and fill in defaults.
#[test]
fn object_returns_copy_with_defaults() {
    let schema = Schema::object([
        ("foo", Schema::object([("bar", Schema::string())])),
        ("baz", Schema::from(42)),
    ]);
    let object = json!({ "foo": { "bar": "biff" } });
    let validated = validate(Some(&object), &schema).expect("object");

    let foo = validated.get("foo").expect("foo");
    assert!(foo.as_object().is_some());
    assert_eq!(foo.get("bar"), Some(Validated::Value(json!("biff"))));
    assert_eq!(validated.get("baz"), Some(Validated::Value(json!(42))));
}

/// Nested objects read unset keys from the enclosing object.
#[test]
fn nested_objects_inherit_outer_settings() {
    let schema = Schema::object([
        ("a", Schema::object([("b", Schema::string())])),
        ("c", Schema::from(42)),
    ]);
    let validated = validate(Some(&json!({ "a": { "b": "x" } })), &schema).expect("object");

    assert_eq!(
        validated.get("a").and_then(|a| a.get("c")),
        Some(Validated::Value(json!(42)))
    );
    assert_eq!(
        validated.to_resolved_value(),
        Some(json!({ "a": { "b": "x", "c": 42 }, "c": 42 }))
    );
    assert_eq!(validated.to_value(), Some(json!({ "a": { "b": "x" }, "c": 42 })));
}

/// Inner declarations override outer defaults for that subtree only.
#[test]
fn inner_setting_overrides_outer_default() {
    let schema = Schema::object([
        ("timeout", Schema::from(30)),
        (
            "upstream",
            Schema::object([
                ("timeout", Schema::from(5)),
                ("pool", Schema::object([("size", Schema::from(4))])),
            ]),
        ),
        ("admin", Schema::object([("port", Schema::from(9000))])),
    ]);
    let validated = validate(None, &schema).expect("defaults");

    let upstream = validated.get("upstream").expect("upstream");
    let pool = upstream.get("pool").expect("pool");
    let admin = validated.get("admin").expect("admin");
    assert_eq!(pool.get("timeout").and_then(|v| v.as_u64()), Some(5));
    assert_eq!(admin.get("timeout").and_then(|v| v.as_u64()), Some(30));
}

fn upstream_section(value: &Value) -> Validated {
    let schema = Schema::object([
        ("upstream", Schema::object([("url", Schema::string())])),
        ("timeout", Schema::from(42)),
    ]);
    validate(Some(value), &schema)
        .expect("valid")
        .get("upstream")
        .expect("upstream")
}

/// A section taken out of its result keeps inherited settings.
#[test]
fn section_outliving_result_keeps_inherited_settings() {
    let upstream = upstream_section(&json!({ "upstream": { "url": "http://a" } }));
    assert_eq!(upstream.get("timeout").and_then(|v| v.as_u64()), Some(42));
    assert_eq!(
        upstream.to_resolved_value(),
        Some(json!({ "url": "http://a", "timeout": 42 }))
    );
    assert_eq!(upstream.to_value(), Some(json!({ "url": "http://a" })));
}

/// Undeclared keys are rejected, naming the offending key.
#[test]
fn object_rejects_unknown_key() {
    let schema = Schema::object([("a", Schema::number())]);
    let err = validate(Some(&json!({ "a": 1, "z": 2 })), &schema).unwrap_err();
    match err {
        ValidationError::UnknownSetting { path, key } => {
            assert_eq!(key, "z");
            assert_eq!(path, "z");
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// The first unknown key in document order is reported.
#[test]
fn unknown_key_reports_first_in_document_order() {
    let schema = Schema::object([("keep", Schema::from(1))]);
    let value: Value = serde_json::from_str(r#"{ "zeta": 1, "keep": 2, "alpha": 3 }"#).expect("json");
    let err = validate(Some(&value), &schema).unwrap_err();
    assert!(matches!(err, ValidationError::UnknownSetting { ref key, .. } if key == "zeta"));
}

/// Errors on declared fields take priority over unknown keys.
#[test]
fn declared_field_errors_win_over_unknown_keys() {
    let schema = Schema::object([("a", Schema::number())]);
    let err = validate(Some(&json!({ "z": 2, "a": "one" })), &schema).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidSetting { .. }));

    let err = validate(Some(&json!({ "z": 2 })), &schema).unwrap_err();
    assert!(matches!(err, ValidationError::MissingSetting { .. }));
}

/// Null or missing sections are read as empty objects.
#[test]
fn null_section_uses_defaults() {
    let schema = Schema::object([("server", Schema::object([("port", Schema::from(8080))]))]);
    let validated = validate(Some(&json!({ "server": null })), &schema).expect("defaults");
    assert_eq!(validated.to_value(), Some(json!({ "server": { "port": 8080 } })));
}

/// Predicates receive the value and pass it through unchanged.
#[test]
fn predicate_passes_value_through() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let schema = Schema::predicate("port in range", move |value| {
        seen.fetch_add(1, Ordering::SeqCst);
        value
            .and_then(Value::as_u64)
            .is_some_and(|port| (1..=65535).contains(&port))
    });

    assert_eq!(
        validate(Some(&json!(8080)), &schema).expect("port"),
        Validated::Value(json!(8080))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let err = validate(Some(&json!(0)), &schema).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid configuration setting in root: expected port in range"
    );
}

/// Predicates may accept absent values; the declared key stays absent.
#[test]
fn predicate_may_accept_absent_value() {
    let schema = Schema::object([(
        "token",
        Schema::predicate("optional string", |value| {
            value.is_none_or(Value::is_string)
        }),
    )]);
    let validated = validate(Some(&json!({})), &schema).expect("optional");
    let object = validated.as_object().expect("object");
    assert_eq!(object.get_own("token"), Some(Validated::Absent));
    assert_eq!(validated.to_value(), Some(json!({})));
}

/// Unknown keys render under the label like every other path.
#[test]
fn unknown_key_path_follows_label() {
    let schema = Schema::object([("a", Schema::object([("b", Schema::from(1))]))]);
    let err = validate_at(
        Some(&json!({ "a": { "c": 2 } })),
        &schema,
        &PathContext::labeled("file:"),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "unknown configuration setting file:.a.c");
}

/// Error messages carry the dotted path outer to inner.
#[test]
fn errors_include_nested_path() {
    let schema = Schema::object([(
        "foo",
        Schema::object([("bar", Schema::string())]),
    )]);
    let err = validate(Some(&json!({ "foo": { "bar": null } })), &schema).unwrap_err();
    assert!(err.to_string().contains("foo.bar"));

    let path = PathContext::labeled("[schema]:");
    let err = validate_at(None, &schema, &path).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing configuration setting in [schema]:.foo.bar"
    );
}

/// Re-validating the plain rendition of a result yields an equal result.
#[test]
fn validation_is_idempotent() {
    let schema = Schema::object([
        ("name", Schema::from("app")),
        ("hosts", Schema::array_of(Schema::object([("port", Schema::from(80))]))),
        ("tls", Schema::object([("enabled", Schema::from(false))])),
    ]);
    let first = validate(Some(&json!({ "hosts": [{}, { "port": 443 }] })), &schema).expect("first");
    let plain = first.to_value().expect("plain");
    let second = validate(Some(&plain), &schema).expect("second");
    assert_eq!(second, first);
}

/// Schemas lifted from JSON behave like hand-built ones.
#[test]
fn json_schema_validates_documents() {
    let schema = Schema::from_json(&json!({ "foo": 42, "bar": { "baz": 13 } })).expect("schema");
    let validated = validate(Some(&json!({ "bar": { "baz": 7 } })), &schema).expect("validated");
    assert_eq!(
        validated.to_resolved_value(),
        Some(json!({ "foo": 42, "bar": { "baz": 7, "foo": 42 } }))
    );
}

/// Resolved trees deserialize into typed configs, inherited keys included.
#[test]
fn deserializes_into_typed_config() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Listener {
        port: u16,
        host: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Config {
        host: String,
        listeners: Listeners,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Listeners {
        public: Listener,
    }

    let schema = Schema::object([
        ("host", Schema::from("0.0.0.0")),
        (
            "listeners",
            ObjectShape::new()
                .field("public", ObjectShape::new().field("port", Schema::number()))
                .into(),
        ),
    ]);
    let validated = validate(
        Some(&json!({ "listeners": { "public": { "port": 8443 } } })),
        &schema,
    )
    .expect("validated");
    let config: Config = validated.deserialize().expect("typed");
    assert_eq!(config.listeners.public.host, "0.0.0.0");
    assert_eq!(config.listeners.public.port, 8443);
    assert_eq!(config.host, "0.0.0.0");
}
