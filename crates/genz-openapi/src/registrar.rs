//! Route registrations to document path entries.

use crate::config::OpenApiConfig;
use crate::operation_id;
use crate::path::{placeholders, translate};
use crate::registry::SchemaRegistry;
use crate::spec::{
    MediaType, OpenApiSpec, Operation, Parameter, RequestBody, ResponseSpec, SchemaRef,
    SecurityRequirement,
};
use genz_validate::{introspect, terminal, Schema};
use http::{Method, StatusCode};
use std::collections::BTreeMap;
use tracing::debug;

/// Everything the documentation needs to know about one route
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pub method: Method,
    /// Resource base path, e.g. `/power-ranger`
    pub base_path: String,
    /// Route path relative to the base, e.g. `/:id`
    pub path: String,
    /// Resource name; used as the tag and as the operation id suffix
    pub resource: String,
    /// Explicit operation id; generated from method and path when absent
    pub operation_id: Option<String>,
    pub params: Option<Schema>,
    pub query: Option<Schema>,
    pub body: Option<Schema>,
    pub response: Schema,
    pub status: StatusCode,
}

impl RouteDescriptor {
    /// Explicit operation id, or the generated fallback
    pub fn resolved_operation_id(&self) -> String {
        match &self.operation_id {
            Some(id) => id.clone(),
            None => operation_id::generate(&self.method, &self.path, &self.resource),
        }
    }

    /// Path as it appears in the document
    pub fn document_path(&self) -> String {
        translate(&self.base_path, &self.path)
    }
}

/// One registered path entry. Entries are never de-duplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEntry {
    pub path: String,
    pub method: Method,
    pub operation: Operation,
}

/// The documentation model: schema registry plus every registered path entry.
///
/// Written only while routes are declared at startup, then read once to
/// produce the served document.
#[derive(Debug)]
pub struct Documentation {
    config: OpenApiConfig,
    registry: SchemaRegistry,
    entries: Vec<PathEntry>,
}

impl Documentation {
    pub fn new(config: OpenApiConfig) -> Self {
        Self {
            config,
            registry: SchemaRegistry::new(),
            entries: Vec::new(),
        }
    }

    pub fn config(&self) -> &OpenApiConfig {
        &self.config
    }

    /// Replace the document metadata; registered routes and schemas are kept.
    ///
    /// Operations already registered are re-pointed at the new security scheme.
    pub fn set_config(&mut self, config: OpenApiConfig) {
        self.config = config;
        let requirement = self.security_requirement();
        for entry in &mut self.entries {
            entry.operation.security = requirement.clone();
        }
    }

    fn security_requirement(&self) -> Vec<SecurityRequirement> {
        vec![BTreeMap::from([(self.config.security_scheme.clone(), Vec::new())])]
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    /// Register a named schema definition; a no-op for a schema already seen
    pub fn register_schema(&mut self, schema: &Schema, fallback: &str) -> SchemaRef {
        let name = self.registry.register(schema, fallback);
        SchemaRef::component(&name)
    }

    /// Emit the path entry for `route`, registering its body and response schemas.
    pub fn register_route(&mut self, route: &RouteDescriptor) -> &PathEntry {
        let operation_id = route.resolved_operation_id();
        let path = route.document_path();

        let request_body = route.body.as_ref().map(|body| RequestBody {
            required: !introspect(body).is_optional(),
            content: MediaType::json(self.register_schema(body, &format!("{}Body", operation_id))),
        });
        let response = self.register_schema(&route.response, &format!("{}Response", operation_id));

        let mut parameters = Vec::new();
        if let Some(params) = &route.params {
            self.push_parameters(&mut parameters, params, "path");
        }
        if let Some(query) = &route.query {
            self.push_parameters(&mut parameters, query, "query");
        }
        for name in placeholders(&path) {
            let declared = parameters
                .iter()
                .any(|p| p.location == "path" && p.name == name);
            if !declared {
                parameters.push(Parameter {
                    name,
                    location: "path".to_string(),
                    required: true,
                    description: None,
                    schema: SchemaRef::Inline(serde_json::json!({ "type": "string" })),
                });
            }
        }

        let operation = Operation {
            tags: vec![route.resource.clone()],
            operation_id: Some(operation_id),
            parameters,
            request_body,
            responses: BTreeMap::from([(
                route.status.as_u16().to_string(),
                ResponseSpec {
                    description: "Successful response".to_string(),
                    content: Some(MediaType::json(response)),
                },
            )]),
            security: self.security_requirement(),
        };

        debug!(
            method = %route.method,
            path = %path,
            operation_id = ?operation.operation_id,
            "Registered documentation entry"
        );

        self.entries.push(PathEntry {
            path,
            method: route.method.clone(),
            operation,
        });
        &self.entries[self.entries.len() - 1]
    }

    fn push_parameters(&mut self, out: &mut Vec<Parameter>, schema: &Schema, location: &str) {
        let Some(fields) = terminal(schema).fields() else {
            return;
        };
        for (name, field) in fields {
            let required = location == "path" || !introspect(field).is_optional();
            out.push(Parameter {
                name: name.clone(),
                location: location.to_string(),
                required,
                description: field.description().map(str::to_string),
                schema: self.registry.reference(field),
            });
        }
    }

    /// Build the document. Later entries for the same path and method replace earlier ones.
    pub fn document(&self) -> OpenApiSpec {
        let mut spec = OpenApiSpec {
            info: Some(self.config.info()),
            schemas: self.registry.definitions().clone(),
            ..Default::default()
        };
        spec.security_schemes
            .insert(self.config.security_scheme.clone(), self.config.security());

        for entry in &self.entries {
            spec = spec.path(&entry.path, &entry.method, entry.operation.clone());
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn route(method: Method, path: &str, response: Schema) -> RouteDescriptor {
        RouteDescriptor {
            method,
            base_path: "/power-ranger".to_string(),
            path: path.to_string(),
            resource: "Power Rangers".to_string(),
            operation_id: None,
            params: None,
            query: None,
            body: None,
            response,
            status: StatusCode::OK,
        }
    }

    #[test]
    fn entry_for_get_by_id() {
        let mut docs = Documentation::new(OpenApiConfig::default());
        let mut get = route(Method::GET, "/:id", Schema::string().openapi("Ranger", "One"));
        get.params = Some(Schema::object([("id", Schema::number())]));

        let entry = docs.register_route(&get).clone();
        assert_eq!(entry.path, "/power-ranger/{id}");
        assert_eq!(entry.operation.operation_id.as_deref(), Some("getOnePowerRangers"));
        assert_eq!(entry.operation.tags, vec!["Power Rangers".to_string()]);
        assert_eq!(entry.operation.parameters.len(), 1);
        assert_eq!(entry.operation.parameters[0].location, "path");
        assert_eq!(
            entry.operation.parameters[0].schema,
            SchemaRef::Inline(json!({"type": "number"}))
        );
        assert!(entry.operation.security[0].contains_key("bearerAuth"));
        assert!(entry.operation.responses.contains_key("200"));
    }

    #[test]
    fn query_fields_required_unless_optional() {
        let mut docs = Documentation::new(OpenApiConfig::default());
        let mut list = route(Method::GET, "/", Schema::string().array());
        list.query = Some(Schema::object([
            ("name", Schema::string().optional()),
            ("page", Schema::number().with_default(1)),
            ("team", Schema::string()),
        ]));

        let params = docs.register_route(&list).operation.parameters.clone();
        let required: Vec<(&str, bool)> =
            params.iter().map(|p| (p.name.as_str(), p.required)).collect();
        assert_eq!(required, [("name", false), ("page", false), ("team", true)]);
        assert!(params.iter().all(|p| p.location == "query"));
    }

    #[test]
    fn undeclared_path_params_are_strings() {
        let mut docs = Documentation::new(OpenApiConfig::default());
        let entry = docs
            .register_route(&route(Method::DELETE, "/:id", Schema::boolean()))
            .clone();
        assert_eq!(entry.operation.parameters[0].name, "id");
        assert_eq!(
            entry.operation.parameters[0].schema,
            SchemaRef::Inline(json!({"type": "string"}))
        );
    }

    #[test]
    fn same_schema_across_routes_registers_once() {
        let mut docs = Documentation::new(OpenApiConfig::default());
        let ranger = Schema::object([("id", Schema::number())]).openapi("Power Ranger", "Go Go");

        let mut create = route(Method::POST, "/", ranger.clone());
        create.body = Some(ranger.clone());
        create.status = StatusCode::CREATED;
        docs.register_route(&create);
        docs.register_route(&route(Method::GET, "/:id", ranger.clone()));

        assert_eq!(docs.registry().len(), 1);
        let doc = docs.document().to_json();
        let create_op = &doc["paths"]["/power-ranger/"]["post"];
        assert_eq!(
            create_op["requestBody"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/PowerRanger"
        );
        assert!(create_op["responses"]["201"].is_object());
    }

    #[test]
    fn untitled_response_named_after_operation() {
        let mut docs = Documentation::new(OpenApiConfig::default());
        docs.register_route(&route(Method::GET, "/", Schema::number().array()));
        assert!(docs.registry().definitions().contains_key("getManyPowerRangersResponse"));
    }

    #[test]
    fn duplicate_routes_append_entries() {
        let mut docs = Documentation::new(OpenApiConfig::default());
        let response = Schema::string();
        let mut first = route(Method::GET, "/", response.clone());
        first.operation_id = Some("first".into());
        let mut second = route(Method::GET, "/", response);
        second.operation_id = Some("second".into());
        docs.register_route(&first);
        docs.register_route(&second);

        assert_eq!(docs.entries().len(), 2);
        let spec = docs.document();
        let op = spec.operation("/power-ranger/", &Method::GET).unwrap();
        assert_eq!(op.operation_id.as_deref(), Some("second"));
    }

    #[test]
    fn explicit_operation_id_wins() {
        let mut r = route(Method::GET, "/search", Schema::string());
        r.operation_id = Some("searchRangers".into());
        assert_eq!(r.resolved_operation_id(), "searchRangers");
    }

    #[test]
    fn document_has_security_scheme() {
        let docs = Documentation::new(OpenApiConfig::default());
        let json = docs.document().to_json();
        assert_eq!(json["components"]["securitySchemes"]["bearerAuth"]["type"], "http");
        assert_eq!(json["info"]["title"], "GenZ Application");
    }

    #[test]
    fn later_config_repoints_operation_security() {
        let mut docs = Documentation::new(OpenApiConfig::default());
        docs.register_route(&route(Method::GET, "/", Schema::string()));
        docs.set_config(OpenApiConfig::new("Zords", "1.0.0").bearer_auth("jwtAuth", None));

        let json = docs.document().to_json();
        let schemes = json["components"]["securitySchemes"].as_object().unwrap();
        assert_eq!(schemes.keys().collect::<Vec<_>>(), ["jwtAuth"]);
        assert_eq!(json["paths"]["/power-ranger/"]["get"]["security"], json!([{"jwtAuth": []}]));
    }
}
