use genz_validate::{
    introspect, validate_body, validate_params_or_query, Schema, SchemaTag, ValidationError,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn raw(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn ranger_query() -> Schema {
    Schema::object([
        ("name", Schema::string().optional()),
        ("seasons", Schema::number().array().optional()),
    ])
}

#[test]
fn test_query_without_name_leaves_it_absent() {
    let parsed = validate_params_or_query(Map::new(), &ranger_query()).unwrap();
    assert!(parsed.get("name").is_none());
}

#[test]
fn test_query_with_name() {
    let parsed = validate_params_or_query(raw(json!({"name": "kim"})), &ranger_query()).unwrap();
    assert_eq!(parsed["name"], "kim");
}

#[test]
fn test_repeated_query_values_become_numbers() {
    let parsed =
        validate_params_or_query(raw(json!({"seasons": ["1", "2"]})), &ranger_query()).unwrap();
    assert_eq!(parsed["seasons"], json!([1, 2]));
}

#[test]
fn test_bad_array_element_reports_index() {
    let err =
        validate_params_or_query(raw(json!({"seasons": ["1", "x"]})), &ranger_query()).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.fields[0].field, "seasons.1");
}

#[test]
fn test_path_id_becomes_numeric() {
    let params = Schema::object([("id", Schema::number())]);
    let parsed = validate_params_or_query(raw(json!({"id": "7"})), &params).unwrap();
    assert_eq!(parsed["id"].as_i64(), Some(7));
}

#[test]
fn test_defaults_are_coerced_and_filled() {
    let query = Schema::object([
        ("page", Schema::number().with_default(1)),
        ("active", Schema::boolean().with_default(true)),
    ]);
    let parsed = validate_params_or_query(raw(json!({"active": "false"})), &query).unwrap();
    assert_eq!(parsed, json!({"page": 1, "active": false}));
}

#[test]
fn test_body_error_serializes_in_envelope() {
    let body = Schema::object([("name", Schema::string())]);
    let err: ValidationError = validate_body(&json!({"name": 5}), &body).unwrap_err();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["error"]["type"], "validation_error");
    assert_eq!(json["error"]["fields"][0]["field"], "name");
    assert_eq!(json["error"]["fields"][0]["params"]["expected"], "string");
}

#[test]
fn test_introspection_of_declared_fields() {
    let query = ranger_query();
    let tags: Vec<(String, SchemaTag, bool)> = query
        .fields()
        .unwrap()
        .iter()
        .map(|(name, schema)| {
            let info = introspect(schema);
            (name.clone(), info.terminal, info.is_optional())
        })
        .collect();
    assert_eq!(
        tags,
        vec![
            ("name".to_string(), SchemaTag::String, true),
            ("seasons".to_string(), SchemaTag::Array, true),
        ]
    );
}

// **Feature: query-validation, Property: undeclared keys never reach the handler**
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_undeclared_keys_are_stripped(key in "[a-z]{3,10}", value in "[a-z0-9]{0,10}") {
        prop_assume!(key != "name" && key != "seasons");
        let mut map = Map::new();
        map.insert(key.clone(), Value::String(value));
        let parsed = validate_params_or_query(map, &ranger_query()).unwrap();
        prop_assert!(parsed.get(&key).is_none());
    }

    #[test]
    fn prop_numeric_lists_round_out(values in proptest::collection::vec(0u32..10_000, 1..8)) {
        let strings: Vec<Value> = values.iter().map(|v| Value::String(v.to_string())).collect();
        let mut map = Map::new();
        map.insert("seasons".to_string(), Value::Array(strings));
        let parsed = validate_params_or_query(map, &ranger_query()).unwrap();
        let expected: Vec<Value> = values.iter().map(|v| json!(v)).collect();
        prop_assert_eq!(&parsed["seasons"], &Value::Array(expected));
    }
}
