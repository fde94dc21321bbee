//! OpenAPI configuration

use crate::spec::{ApiInfo, Contact, License, SecurityScheme};

/// Configuration for the generated document and the endpoint serving it
#[derive(Debug, Clone)]
pub struct OpenApiConfig {
    /// API title
    pub title: String,
    /// API version
    pub version: String,
    /// API description
    pub description: Option<String>,
    /// Contact name shown in the document info
    pub contact_name: Option<String>,
    /// License name and optional URL
    pub license: Option<(String, Option<String>)>,
    /// Path to serve OpenAPI JSON
    pub json_path: String,
    /// Name of the security scheme every operation references
    pub security_scheme: String,
    /// `bearerFormat` of the security scheme
    pub bearer_format: Option<String>,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            title: "GenZ Application".to_string(),
            version: "1.0.0".to_string(),
            description: None,
            contact_name: None,
            license: None,
            json_path: "/api-spec.json".to_string(),
            security_scheme: "bearerAuth".to_string(),
            bearer_format: Some("username".to_string()),
        }
    }
}

impl OpenApiConfig {
    /// Create a new OpenAPI configuration
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// Set API description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn contact(mut self, name: impl Into<String>) -> Self {
        self.contact_name = Some(name.into());
        self
    }

    pub fn license(mut self, name: impl Into<String>, url: Option<String>) -> Self {
        self.license = Some((name.into(), url));
        self
    }

    /// Set path for OpenAPI JSON endpoint
    pub fn json_path(mut self, path: impl Into<String>) -> Self {
        self.json_path = path.into();
        self
    }

    /// Name the security scheme and set its bearer format
    pub fn bearer_auth(mut self, name: impl Into<String>, format: Option<String>) -> Self {
        self.security_scheme = name.into();
        self.bearer_format = format;
        self
    }

    pub(crate) fn info(&self) -> ApiInfo {
        ApiInfo {
            title: self.title.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            contact: self.contact_name.clone().map(|name| Contact { name }),
            license: self.license.clone().map(|(name, url)| License { name, url }),
        }
    }

    pub(crate) fn security(&self) -> SecurityScheme {
        SecurityScheme::bearer(self.bearer_format.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = OpenApiConfig::default();
        assert_eq!(config.json_path, "/api-spec.json");
        assert_eq!(config.security_scheme, "bearerAuth");
        assert_eq!(config.security().bearer_format.as_deref(), Some("username"));
    }

    #[test]
    fn info_carries_contact_and_license() {
        let info = OpenApiConfig::new("Gen Z Validation", "1.0.0")
            .description("Routes validated with schemas")
            .contact("Ranger HQ")
            .license("MIT", Some("https://opensource.org/licenses/MIT".into()))
            .info();
        assert_eq!(info.title, "Gen Z Validation");
        assert_eq!(info.contact.map(|c| c.name).as_deref(), Some("Ranger HQ"));
        assert_eq!(info.license.map(|l| l.name).as_deref(), Some("MIT"));
    }
}
