//! Identity-keyed schema registry and schema to JSON Schema conversion.

use crate::spec::SchemaRef;
use genz_validate::{introspect, Schema, SchemaId, SchemaKind};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Named component definitions, de-duplicated by schema identity.
///
/// Registering the same [`Schema`] (or a clone of it) twice is a no-op.
/// Two structurally identical schemas built separately are distinct
/// identities and get distinct definitions.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    names: HashMap<SchemaId, String>,
    definitions: BTreeMap<String, Value>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, schema: &Schema) -> bool {
        self.names.contains_key(&schema.id())
    }

    /// Component name a registered schema was emitted under
    pub fn name_of(&self, schema: &Schema) -> Option<&str> {
        self.names.get(&schema.id()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> &BTreeMap<String, Value> {
        &self.definitions
    }

    /// Emit `schema` as a named definition unless its identity was seen.
    ///
    /// Titled schemas are named after their title, others use `fallback`.
    /// Returns the component name.
    pub fn register(&mut self, schema: &Schema, fallback: &str) -> String {
        if let Some(name) = self.names.get(&schema.id()) {
            return name.clone();
        }

        let base = schema
            .title()
            .map(component_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| component_name(fallback));
        let name = self.unique_name(base);

        // Reserve the name before converting so nested registrations cannot take it.
        self.names.insert(schema.id(), name.clone());
        self.definitions.insert(name.clone(), Value::Null);
        let definition = self.convert(schema);
        self.definitions.insert(name.clone(), definition);

        name
    }

    /// `$ref` for titled schemas (registering them), inline JSON Schema otherwise
    pub fn reference(&mut self, schema: &Schema) -> SchemaRef {
        match schema.title() {
            Some(title) => {
                let name = self.register(schema, title);
                SchemaRef::component(&name)
            }
            None => SchemaRef::Inline(self.convert(schema)),
        }
    }

    fn unique_name(&self, base: String) -> String {
        if !self.definitions.contains_key(&base) {
            return base;
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{}{}", base, suffix);
            if !self.definitions.contains_key(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// JSON Schema for the node itself; children go through [`Self::reference`]
    fn convert(&mut self, schema: &Schema) -> Value {
        let mut value = match schema.kind() {
            SchemaKind::Object(fields) => {
                let mut properties = Map::new();
                let mut required = Vec::new();
                for (name, field) in fields {
                    if !introspect(field).is_optional() {
                        required.push(Value::String(name.clone()));
                    }
                    properties.insert(name.clone(), self.reference(field).to_value());
                }
                let mut object = json!({ "type": "object", "properties": properties });
                if !required.is_empty() {
                    object["required"] = Value::Array(required);
                }
                object
            }
            SchemaKind::Array(element) => {
                json!({ "type": "array", "items": self.reference(element).to_value() })
            }
            SchemaKind::Optional(inner) => self.reference(inner).to_value(),
            SchemaKind::Default { inner, value } => {
                with_default(self.reference(inner).to_value(), value.clone())
            }
            SchemaKind::Number => json!({ "type": "number" }),
            SchemaKind::Boolean => json!({ "type": "boolean" }),
            SchemaKind::String => json!({ "type": "string" }),
            SchemaKind::Enum(options) => json!({ "type": "string", "enum": options }),
        };

        if let (Some(docs), Some(object)) = (schema.docs(), value.as_object_mut()) {
            if !object.contains_key("$ref") {
                if let Some(title) = &docs.title {
                    object.insert("title".to_string(), Value::String(title.clone()));
                }
                if let Some(description) = &docs.description {
                    object.insert("description".to_string(), Value::String(description.clone()));
                }
            }
        }

        value
    }
}

fn with_default(mut schema: Value, default: Value) -> Value {
    match schema.as_object_mut() {
        Some(object) if !object.contains_key("$ref") => {
            object.insert("default".to_string(), default);
            schema
        }
        _ => json!({ "allOf": [schema], "default": default }),
    }
}

fn component_name(title: &str) -> String {
    title.split_whitespace().collect()
}
