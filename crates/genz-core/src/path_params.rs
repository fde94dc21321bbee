//! Path parameter storage
//!
//! Routes rarely capture more than a handful of segments, so parameters live
//! in a `SmallVec` that stays on the stack for up to four entries.

use serde_json::{Map, Value};
use smallvec::SmallVec;

/// Maximum number of path parameters stored without heap allocation
pub const STACK_PARAMS_CAPACITY: usize = 4;

/// Percent-decoded path parameters, in path order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    inner: SmallVec<[(String, String); STACK_PARAMS_CAPACITY]>,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw segment, percent-decoding it.
    ///
    /// Segments that do not decode to UTF-8 are kept as received.
    pub fn insert_raw(&mut self, key: &str, raw: &str) {
        let value = match urlencoding::decode(raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.to_string(),
        };
        self.inner.push((key.to_string(), value));
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Raw string mapping handed to coercion and validation
    pub fn to_map(&self) -> Map<String, Value> {
        self.inner
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, raw) in iter {
            params.insert_raw(key, raw);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_escapes() {
        let params: PathParams = [("name", "Kimberly%20Hart"), ("id", "7")].into_iter().collect();
        assert_eq!(params.get("name"), Some("Kimberly Hart"));
        assert_eq!(params.get("id"), Some("7"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn invalid_utf8_is_kept_raw() {
        let params: PathParams = [("name", "%FF")].into_iter().collect();
        assert_eq!(params.get("name"), Some("%FF"));
    }

    #[test]
    fn to_map_holds_strings() {
        let params: PathParams = [("id", "42")].into_iter().collect();
        let map = params.to_map();
        assert_eq!(map["id"], Value::String("42".into()));
    }

    #[test]
    fn stays_on_stack_for_few_params() {
        let params: PathParams = [("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]
            .into_iter()
            .collect();
        assert!(!params.inner.spilled());
        assert!(params.iter().map(|(k, _)| k).eq(["a", "b", "c", "d"]));
    }
}
