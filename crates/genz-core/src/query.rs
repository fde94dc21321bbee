//! Query-string decoding into the raw mapping coercion works on.

use serde_json::{Map, Value};

/// Decode a query string.
///
/// `+` and percent escapes are decoded. A key seen once maps to a string, a
/// repeated key maps to an array of strings in order, and a `key[]` form
/// always maps `key` to an array.
pub fn parse_query(query: Option<&str>) -> Result<Map<String, Value>, serde_urlencoded::de::Error> {
    let mut map = Map::new();
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return Ok(map);
    };

    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
    for (key, value) in pairs {
        let force_array = key.ends_with("[]");
        let key = if force_array {
            key[..key.len() - 2].to_string()
        } else {
            key
        };
        let value = Value::String(value);

        match map.get_mut(&key) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None if force_array => {
                map.insert(key, Value::Array(vec![value]));
            }
            None => {
                map.insert(key, value);
            }
        }
    }

    Ok(map)
}
