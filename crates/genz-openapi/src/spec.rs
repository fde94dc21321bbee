//! OpenAPI specification types

use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Contact information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub name: String,
}

/// License information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct License {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// API information for OpenAPI spec
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

/// Security scheme component
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    pub scheme: String,
    #[serde(rename = "bearerFormat", skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
}

impl SecurityScheme {
    /// HTTP bearer authentication
    pub fn bearer(format: Option<String>) -> Self {
        Self {
            scheme_type: "http".to_string(),
            scheme: "bearer".to_string(),
            bearer_format: format,
        }
    }
}

/// The generated document
#[derive(Debug, Clone, Default)]
pub struct OpenApiSpec {
    pub info: Option<ApiInfo>,
    pub paths: BTreeMap<String, PathItem>,
    pub schemas: BTreeMap<String, Value>,
    pub security_schemes: BTreeMap<String, SecurityScheme>,
}

/// Path item in OpenAPI spec
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
}

impl PathItem {
    /// Set the operation for `method`, replacing any previous one.
    /// Methods outside get/post/put/patch/delete are ignored.
    pub fn set(&mut self, method: &Method, operation: Operation) {
        let slot = match *method {
            Method::GET => &mut self.get,
            Method::POST => &mut self.post,
            Method::PUT => &mut self.put,
            Method::PATCH => &mut self.patch,
            Method::DELETE => &mut self.delete,
            _ => return,
        };
        *slot = Some(operation);
    }

    pub fn get_operation(&self, method: &Method) -> Option<&Operation> {
        match *method {
            Method::GET => self.get.as_ref(),
            Method::POST => self.post.as_ref(),
            Method::PUT => self.put.as_ref(),
            Method::PATCH => self.patch.as_ref(),
            Method::DELETE => self.delete.as_ref(),
            _ => None,
        }
    }
}

/// Security requirement: scheme name to scopes
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// Operation (endpoint) in OpenAPI spec
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    pub responses: BTreeMap<String, ResponseSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub security: Vec<SecurityRequirement>,
}

/// Parameter in OpenAPI spec
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: SchemaRef,
}

/// Request body in OpenAPI spec
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestBody {
    pub required: bool,
    pub content: BTreeMap<String, MediaType>,
}

/// Media type in OpenAPI spec
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaType {
    pub schema: SchemaRef,
}

impl MediaType {
    /// Single `application/json` content entry
    pub fn json(schema: SchemaRef) -> BTreeMap<String, MediaType> {
        BTreeMap::from([("application/json".to_string(), MediaType { schema })])
    }
}

/// Response specification
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ResponseSpec {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeMap<String, MediaType>>,
}

/// Schema reference or inline schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SchemaRef {
    Ref {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Inline(Value),
}

impl SchemaRef {
    /// Reference to a component schema by name
    pub fn component(name: &str) -> Self {
        Self::Ref {
            reference: format!("#/components/schemas/{}", name),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Ref { reference } => serde_json::json!({ "$ref": reference }),
            Self::Inline(value) => value.clone(),
        }
    }
}

impl OpenApiSpec {
    /// Add a path operation
    pub fn path(mut self, path: &str, method: &Method, operation: Operation) -> Self {
        self.paths
            .entry(path.to_string())
            .or_default()
            .set(method, operation);
        self
    }

    /// Look up the operation registered for a path and method
    pub fn operation(&self, path: &str, method: &Method) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.get_operation(method))
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> Value {
        let mut spec = serde_json::json!({
            "openapi": "3.0.3",
            "info": self.info,
            "paths": self.paths,
        });

        let mut components = serde_json::Map::new();
        if !self.schemas.is_empty() {
            components.insert("schemas".to_string(), serde_json::json!(self.schemas));
        }
        if !self.security_schemes.is_empty() {
            components.insert(
                "securitySchemes".to_string(),
                serde_json::json!(self.security_schemes),
            );
        }
        if !components.is_empty() {
            spec["components"] = Value::Object(components);
        }

        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_item_last_write_wins() {
        let mut item = PathItem::default();
        item.set(
            &Method::GET,
            Operation {
                operation_id: Some("first".into()),
                ..Default::default()
            },
        );
        item.set(
            &Method::GET,
            Operation {
                operation_id: Some("second".into()),
                ..Default::default()
            },
        );
        assert_eq!(
            item.get_operation(&Method::GET).and_then(|o| o.operation_id.as_deref()),
            Some("second")
        );
        assert!(item.post.is_none());
    }

    #[test]
    fn unsupported_methods_are_ignored() {
        let mut item = PathItem::default();
        item.set(&Method::OPTIONS, Operation::default());
        assert_eq!(item, PathItem::default());
    }

    #[test]
    fn to_json_includes_components() {
        let mut spec = OpenApiSpec::default();
        spec.schemas
            .insert("Ranger".into(), serde_json::json!({"type": "object"}));
        spec.security_schemes
            .insert("bearerAuth".into(), SecurityScheme::bearer(Some("username".into())));

        let json = spec.to_json();
        assert_eq!(json["openapi"], "3.0.3");
        assert_eq!(json["components"]["schemas"]["Ranger"]["type"], "object");
        assert_eq!(json["components"]["securitySchemes"]["bearerAuth"]["scheme"], "bearer");
        assert_eq!(
            json["components"]["securitySchemes"]["bearerAuth"]["bearerFormat"],
            "username"
        );
    }

    #[test]
    fn schema_ref_serializes_as_dollar_ref() {
        let json = serde_json::to_value(SchemaRef::component("Ranger")).unwrap();
        assert_eq!(json, serde_json::json!({"$ref": "#/components/schemas/Ranger"}));
    }
}
