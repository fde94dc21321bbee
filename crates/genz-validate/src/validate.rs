//! Structural validation against a schema tree.

use crate::coerce::coerce;
use crate::error::{FieldError, ValidationError};
use crate::introspect::terminal;
use crate::schema::{Schema, SchemaKind};
use serde_json::{Map, Value};

/// Validate `value` against `schema` and return the parsed value.
///
/// Every issue in the tree is reported, not just the first. The parsed value
/// has `default` fields filled in, absent `optional` fields left out and
/// object keys the schema does not declare removed.
pub fn validate(value: &Value, schema: &Schema) -> Result<Value, ValidationError> {
    match validate_field(Some(value), schema)? {
        Some(parsed) => Ok(parsed),
        None => Ok(Value::Null),
    }
}

/// Validate a possibly-absent value. `Ok(None)` means absence was accepted.
pub fn validate_field(
    value: Option<&Value>,
    schema: &Schema,
) -> Result<Option<Value>, ValidationError> {
    let mut checker = Checker::default();
    let parsed = checker.check(value, schema);
    if checker.issues.is_empty() {
        Ok(parsed)
    } else {
        Err(ValidationError::new(checker.issues))
    }
}

/// Coerce every declared field of a params/query mapping, then validate it.
///
/// Coercion only runs when the schema's terminal node is an object. Fields
/// are visited in declaration order; keys the schema does not declare are
/// not coerced (and are stripped by validation).
pub fn validate_params_or_query(
    mut raw: Map<String, Value>,
    schema: &Schema,
) -> Result<Value, ValidationError> {
    if let Some(fields) = terminal(schema).fields() {
        for (name, field) in fields {
            coerce(name, &mut raw, field);
        }
    }
    validate(&Value::Object(raw), schema)
}

/// Validate a decoded JSON body. Bodies are never coerced.
pub fn validate_body(body: &Value, schema: &Schema) -> Result<Value, ValidationError> {
    validate(body, schema)
}

/// JSON type name used in `invalid_type` messages
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Default)]
struct Checker {
    path: Vec<String>,
    issues: Vec<FieldError>,
}

impl Checker {
    fn field_path(&self) -> String {
        self.path.join(".")
    }

    fn issue(&mut self, build: impl FnOnce(&str) -> FieldError) {
        let path = self.field_path();
        self.issues.push(build(&path));
    }

    fn nested<T>(&mut self, segment: String, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(segment);
        let out = f(self);
        self.path.pop();
        out
    }

    fn check(&mut self, value: Option<&Value>, schema: &Schema) -> Option<Value> {
        match schema.kind() {
            SchemaKind::Optional(inner) => match value {
                None => None,
                Some(_) => self.check(value, inner),
            },
            SchemaKind::Default { inner, value: fallback } => match value {
                None => self.check(Some(fallback), inner),
                Some(_) => self.check(value, inner),
            },
            _ => match value {
                None => {
                    self.issue(FieldError::required);
                    None
                }
                Some(present) => self.check_present(present, schema),
            },
        }
    }

    fn check_present(&mut self, value: &Value, schema: &Schema) -> Option<Value> {
        match (schema.kind(), value) {
            (SchemaKind::Number, Value::Number(_))
            | (SchemaKind::Boolean, Value::Bool(_))
            | (SchemaKind::String, Value::String(_)) => Some(value.clone()),
            (SchemaKind::Enum(options), Value::String(s)) => {
                if options.iter().any(|o| o == s) {
                    Some(value.clone())
                } else {
                    self.issue(|path| FieldError::invalid_enum_value(path, options, s));
                    None
                }
            }
            (SchemaKind::Array(element), Value::Array(items)) => {
                let parsed = items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, item)| {
                        self.nested(index.to_string(), |c| c.check(Some(item), element))
                    })
                    .collect();
                Some(Value::Array(parsed))
            }
            (SchemaKind::Object(fields), Value::Object(map)) => {
                let mut parsed = Map::new();
                for (name, field) in fields {
                    let checked = self.nested(name.clone(), |c| c.check(map.get(name), field));
                    if let Some(v) = checked {
                        parsed.insert(name.clone(), v);
                    }
                }
                Some(Value::Object(parsed))
            }
            (kind, _) => {
                let expected = match kind {
                    SchemaKind::Enum(_) => "string",
                    other => other.tag().as_str(),
                };
                let received = type_name(value);
                self.issue(|path| FieldError::invalid_type(path, expected, received));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ranger() -> Schema {
        let season = Schema::object([
            ("season", Schema::enumeration(["1", "2", "3", "zeo"])),
            ("color", Schema::enumeration(["red", "yellow", "black", "pink"])),
        ]);
        Schema::object([
            ("id", Schema::number()),
            ("name", Schema::string()),
            ("seasons", season.array()),
        ])
    }

    #[test]
    fn valid_body_passes_through() {
        let body = json!({"id": 1, "name": "Jason", "seasons": [{"season": "1", "color": "red"}]});
        assert_eq!(validate_body(&body, &ranger()).unwrap(), body);
    }

    #[test]
    fn reports_every_issue_with_paths() {
        let body = json!({"id": "1", "seasons": [{"season": "4", "color": "red"}, {"color": 3}]});
        let err = validate_body(&body, &ranger()).unwrap_err();
        let fields: Vec<(&str, &str)> = err
            .fields
            .iter()
            .map(|f| (f.field.as_str(), f.code.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("id", "invalid_type"),
                ("name", "required"),
                ("seasons.0.season", "invalid_enum_value"),
                ("seasons.1.season", "required"),
                ("seasons.1.color", "invalid_type"),
            ]
        );
    }

    #[test]
    fn unknown_keys_are_stripped() {
        let schema = Schema::object([("name", Schema::string())]);
        let parsed = validate(&json!({"name": "Kim", "extra": true}), &schema).unwrap();
        assert_eq!(parsed, json!({"name": "Kim"}));
    }

    #[test]
    fn defaults_fill_absent_fields() {
        let schema = Schema::object([
            ("page", Schema::number().with_default(1)),
            ("name", Schema::string().optional()),
        ]);
        let parsed = validate(&json!({}), &schema).unwrap();
        assert_eq!(parsed, json!({"page": 1}));
    }

    #[test]
    fn null_is_not_absent() {
        let schema = Schema::object([("name", Schema::string().optional())]);
        let err = validate(&json!({"name": null}), &schema).unwrap_err();
        assert_eq!(err.fields[0].code, "invalid_type");
        assert_eq!(err.fields[0].params.as_ref().unwrap()["received"], "null");
    }

    #[test]
    fn absent_root_with_optional() {
        assert_eq!(validate_field(None, &Schema::string().optional()), Ok(None));
        let err = validate_field(None, &Schema::string()).unwrap_err();
        assert_eq!(err.fields[0].field, "");
        assert_eq!(err.fields[0].code, "required");
    }

    #[test]
    fn params_are_coerced_before_validation() {
        let schema = Schema::object([("id", Schema::number())]);
        let mut raw = Map::new();
        raw.insert("id".into(), json!("7"));
        assert_eq!(validate_params_or_query(raw, &schema).unwrap(), json!({"id": 7}));
    }

    #[test]
    fn query_with_optional_fields() {
        let schema = Schema::object([
            ("name", Schema::string().optional()),
            ("seasons", Schema::number().array().optional()),
        ]);

        let parsed = validate_params_or_query(Map::new(), &schema).unwrap();
        assert_eq!(parsed, json!({}));

        let mut raw = Map::new();
        raw.insert("name".into(), json!("kim"));
        raw.insert("seasons".into(), json!("2"));
        let parsed = validate_params_or_query(raw, &schema).unwrap();
        assert_eq!(parsed, json!({"name": "kim", "seasons": [2]}));
    }

    #[test]
    fn uncoercible_boolean_is_rejected() {
        let schema = Schema::object([("active", Schema::boolean())]);
        let mut raw = Map::new();
        raw.insert("active".into(), json!("yes"));
        let err = validate_params_or_query(raw, &schema).unwrap_err();
        assert_eq!(err.fields[0].field, "active");
        assert_eq!(err.fields[0].code, "invalid_type");
    }

    #[test]
    fn bodies_are_not_coerced() {
        let schema = Schema::object([("id", Schema::number())]);
        let err = validate_body(&json!({"id": "7"}), &schema).unwrap_err();
        assert_eq!(err.fields[0].field, "id");
    }

    #[test]
    fn non_object_params_schema_skips_coercion() {
        let schema = Schema::string().optional();
        let mut raw = Map::new();
        raw.insert("id".into(), json!("7"));
        let err = validate_params_or_query(raw, &schema).unwrap_err();
        assert_eq!(err.fields[0].code, "invalid_type");
    }
}
