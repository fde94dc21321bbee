//! GenZ application builder

use crate::config::{ConfigError, Environment, ServerConfig};
use crate::error::{DefaultErrorBoundary, ErrorBoundary};
use crate::route::RouterOptions;
use crate::router::{ResourceRouter, RouteConflictError, RouteTable};
use crate::server::AppService;
use genz_openapi::{Documentation, OpenApiConfig, OpenApiSpec};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors raised while turning the declared routes into a service
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("{0}")]
    Conflict(#[from] RouteConflictError),
    #[error("failed to render the API document: {0}")]
    Spec(#[from] serde_json::Error),
}

/// Main application builder for GenZ
///
/// Owns the documentation model and the route table. Resources are declared
/// through [`GenZApp::resource`] before the app is served; nothing is written
/// to either once the service is built.
///
/// # Example
///
/// ```rust,ignore
/// use genz_rs::prelude::*;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let mut app = GenZApp::from_env()?.openapi(OpenApiConfig::new("Power Ranger API", "1.0.0"));
///
///     let mut rangers = app.resource(RouterOptions::new("Power Rangers", "/power-ranger"));
///     rangers.get("/:id", RouteSpec::new(ranger.typed()).params(id.typed()), get_ranger);
///
///     app.run().await
/// }
/// ```
pub struct GenZApp {
    config: ServerConfig,
    environment: Environment,
    docs: Documentation,
    routes: RouteTable,
    boundary: Arc<dyn ErrorBoundary>,
}

impl GenZApp {
    /// Create a new application for the current [`Environment`]
    pub fn new() -> Self {
        let environment = Environment::current();

        // Initialize tracing if not already done
        let _ = tracing_subscriber::registry()
            .with(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(environment.log_directive())),
            )
            .with(tracing_subscriber::fmt::layer())
            .try_init();

        Self {
            config: ServerConfig::default(),
            environment,
            docs: Documentation::new(OpenApiConfig::default()),
            routes: RouteTable::default(),
            boundary: Arc::new(DefaultErrorBoundary),
        }
    }

    /// Create an application configured from `GENZ_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new().with_config(ServerConfig::from_env()?))
    }

    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the document metadata, spec path and security scheme
    pub fn openapi(mut self, config: OpenApiConfig) -> Self {
        self.docs.set_config(config);
        self
    }

    /// Override the detected environment
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the request body size limit in bytes
    ///
    /// ```rust,ignore
    /// GenZApp::new().body_limit(5 * 1024 * 1024) // 5MB limit
    /// ```
    pub fn body_limit(mut self, limit: usize) -> Self {
        self.config.body_limit = limit;
        self
    }

    /// Replace the process-wide error boundary
    pub fn error_boundary<E: ErrorBoundary>(mut self, boundary: E) -> Self {
        self.boundary = Arc::new(boundary);
        self
    }

    /// Start declaring the routes of a resource
    pub fn resource(&mut self, options: RouterOptions) -> ResourceRouter<'_> {
        ResourceRouter::new(options, &mut self.docs, &mut self.routes)
    }

    /// Declare a resource's routes inside a builder chain
    ///
    /// ```rust,ignore
    /// let app = GenZApp::new().mount(RouterOptions::new("Zords", "/zord"), |zords| {
    ///     zords.get("/", RouteSpec::new(list.typed()), list_zords);
    /// });
    /// ```
    pub fn mount<F>(mut self, options: RouterOptions, declare: F) -> Self
    where
        F: FnOnce(&mut ResourceRouter<'_>),
    {
        let mut router = self.resource(options);
        declare(&mut router);
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn current_environment(&self) -> &Environment {
        &self.environment
    }

    /// The documentation model as declared so far
    pub fn documentation(&self) -> &Documentation {
        &self.docs
    }

    /// The API document for the routes declared so far
    pub fn openapi_spec(&self) -> OpenApiSpec {
        self.docs.document()
    }

    /// Compile the routes and render the document.
    ///
    /// Fails when two declared paths cannot be told apart.
    pub fn into_service(self) -> Result<AppService, BuildError> {
        let router = self.routes.compile()?;
        let spec_json = genz_openapi::render(&self.docs.document())?;
        debug!(
            routes = router.registered_routes().len(),
            schemas = self.docs.registry().len(),
            "Service built"
        );

        Ok(AppService::new(
            router,
            self.boundary,
            self.environment,
            self.docs.config().json_path.clone(),
            spec_json,
            self.config.body_limit,
        ))
    }

    /// Serve on the configured host and port
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.config.addr();
        self.run_on(&addr).await
    }

    /// Serve on `addr`
    ///
    /// ```rust,ignore
    /// app.run_on("127.0.0.1:8080").await
    /// ```
    pub async fn run_on(self, addr: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let service = self.into_service()?;
        service.serve(addr).await
    }
}

impl Default for GenZApp {
    fn default() -> Self {
        Self::new()
    }
}
