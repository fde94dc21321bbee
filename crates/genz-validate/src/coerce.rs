//! Wire-string coercion for path and query parameters.
//!
//! Path segments and query strings only ever carry strings (or repeated
//! strings). [`coerce`] walks a field's schema and converts the raw value in
//! place to the primitive the schema expects. A value that cannot be converted
//! is left alone; structural validation then reports it.

use crate::introspect::terminal;
use crate::schema::{Schema, SchemaKind, SchemaTag};
use serde_json::{Map, Number, Value};

/// Largest integer a double represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Coerce `params[field]` in place according to `schema`.
///
/// - `default` recurses into its inner node; substitution happens during validation
/// - `optional` recurses only when the field is present
/// - `array` converts every element to the element's terminal kind. A single
///   scalar is wrapped in a one-element array first.
/// - `number` parses strings, `boolean` maps `"true"`/`"false"`
/// - `string`, `enum` and `object` are left untouched
pub fn coerce(field: &str, params: &mut Map<String, Value>, schema: &Schema) {
    match schema.kind() {
        SchemaKind::Default { inner, .. } => coerce(field, params, inner),
        SchemaKind::Optional(inner) => {
            if params.contains_key(field) {
                coerce(field, params, inner);
            }
        }
        SchemaKind::Array(element) => {
            let kind = terminal(element).tag();
            let Some(value) = params.get_mut(field) else {
                return;
            };
            match value {
                Value::Array(items) => {
                    for item in items.iter_mut() {
                        coerce_scalar(kind, item);
                    }
                }
                other => {
                    let mut single = other.take();
                    coerce_scalar(kind, &mut single);
                    *other = Value::Array(vec![single]);
                }
            }
            coerce(field, params, element);
        }
        SchemaKind::Number => {
            if let Some(value) = params.get_mut(field) {
                coerce_scalar(SchemaTag::Number, value);
            }
        }
        SchemaKind::Boolean => {
            if let Some(value) = params.get_mut(field) {
                coerce_scalar(SchemaTag::Boolean, value);
            }
        }
        SchemaKind::String | SchemaKind::Enum(_) | SchemaKind::Object(_) => {}
    }
}

fn coerce_scalar(kind: SchemaTag, value: &mut Value) {
    match kind {
        SchemaTag::Number => {
            if let Value::String(raw) = value {
                if let Some(number) = parse_number(raw) {
                    *value = number;
                }
            }
        }
        SchemaTag::Boolean => {
            let parsed = match value {
                Value::String(raw) if raw == "true" => Some(true),
                Value::String(raw) if raw == "false" => Some(false),
                _ => None,
            };
            if let Some(parsed) = parsed {
                *value = Value::Bool(parsed);
            }
        }
        _ => {}
    }
}

/// Parse a wire string as a JSON number.
///
/// Follows the usual numeric-string rules: surrounding whitespace is ignored,
/// an empty string is zero, `0x`/`0o`/`0b` prefixes select a radix, decimal
/// and exponent forms are accepted. Non-finite results are rejected.
pub fn parse_number(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(Value::from(0));
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() || digits.starts_with(['+', '-']) {
            return None;
        }
        return u64::from_str_radix(digits, radix)
            .ok()
            .map(|n| number_value(n as f64));
    }

    let numeric = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !numeric {
        return None;
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(number_value)
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}
