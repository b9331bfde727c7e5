use crate::{
    cache::{Cache, ConcurrentCache},
    debugger::{ConsoleDebugger, Debugger},
    error::Error,
    formatter::{Formatter, JsonFormatter},
    http_client::{HttpClient, ReqwestHttpClient, DEFAULT_USER_AGENT},
    pathfinder::{DynamicPathFinder, PathFinder, XmlPathFinder, YamlPathFinder},
    schema::{RawSchemaValidator, ReferenceSchemaValidator, SchemaValidator},
    template::{PlaceholderTemplateEngine, TemplateEngine},
};
use std::{path::PathBuf, sync::Arc};

/// Capabilities a `State` is built from. Anything left unset falls back to
/// the default implementation when the state is created.
#[derive(Debug)]
pub struct ApiConfiguration {
    is_debug: bool,
    json_schema_dir: Option<PathBuf>,
    accept_invalid_certs: bool,
    user_agent: String,
    http_client: Option<Arc<dyn HttpClient + Send + Sync>>,
    cache: Option<Arc<dyn Cache + Send + Sync>>,
    template_engine: Option<Arc<dyn TemplateEngine + Send + Sync>>,
    json_path_finder: Option<Arc<dyn PathFinder + Send + Sync>>,
    yaml_path_finder: Option<Arc<dyn PathFinder + Send + Sync>>,
    xml_path_finder: Option<Arc<dyn PathFinder + Send + Sync>>,
    deserializer: Option<Arc<dyn Formatter + Send + Sync>>,
    string_schema_validator: Option<Arc<dyn SchemaValidator + Send + Sync>>,
    reference_schema_validator: Option<Arc<dyn SchemaValidator + Send + Sync>>,
    debugger: Option<Arc<dyn Debugger + Send + Sync>>,
}

impl ApiConfiguration {
    pub fn new() -> Self {
        Self {
            is_debug: false,
            json_schema_dir: None,
            accept_invalid_certs: true,
            user_agent: String::from(DEFAULT_USER_AGENT),
            http_client: None,
            cache: None,
            template_engine: None,
            json_path_finder: None,
            yaml_path_finder: None,
            xml_path_finder: None,
            deserializer: None,
            string_schema_validator: None,
            reference_schema_validator: None,
            debugger: None,
        }
    }

    pub fn set_debug(&mut self, value: bool) {
        self.is_debug = value;
    }

    pub fn is_debug(&self) -> bool {
        self.is_debug
    }

    pub fn set_json_schema_dir<P: Into<PathBuf>>(&mut self, dir: P) {
        self.json_schema_dir = Some(dir.into());
    }

    pub fn json_schema_dir(&self) -> Option<&PathBuf> {
        self.json_schema_dir.as_ref()
    }

    /// Only used by the default HTTP client.
    pub fn set_accept_invalid_certs(&mut self, value: bool) {
        self.accept_invalid_certs = value;
    }

    /// Only used by the default HTTP client.
    pub fn set_user_agent<S: Into<String>>(&mut self, user_agent: S) {
        self.user_agent = user_agent.into();
    }

    pub fn set_http_client(&mut self, http_client: Arc<dyn HttpClient + Send + Sync>) {
        self.http_client = Some(http_client);
    }

    /// Fails when the default client can not be built from the configured
    /// options.
    pub fn http_client(&self) -> Result<Arc<dyn HttpClient + Send + Sync>, Error> {
        match &self.http_client {
            Some(http_client) => Ok(http_client.clone()),
            None => Ok(Arc::new(ReqwestHttpClient::with_options(
                self.accept_invalid_certs,
                &self.user_agent,
            )?)),
        }
    }

    /// A cache shared between several states is reset by each of them.
    pub fn set_cache(&mut self, cache: Arc<dyn Cache + Send + Sync>) {
        self.cache = Some(cache);
    }

    pub fn cache(&self) -> Arc<dyn Cache + Send + Sync> {
        self.cache
            .clone()
            .unwrap_or_else(|| Arc::new(ConcurrentCache::new()))
    }

    pub fn set_template_engine(&mut self, template_engine: Arc<dyn TemplateEngine + Send + Sync>) {
        self.template_engine = Some(template_engine);
    }

    pub fn template_engine(&self) -> Arc<dyn TemplateEngine + Send + Sync> {
        self.template_engine
            .clone()
            .unwrap_or_else(|| Arc::new(PlaceholderTemplateEngine::new()))
    }

    pub fn set_json_path_finder(&mut self, path_finder: Arc<dyn PathFinder + Send + Sync>) {
        self.json_path_finder = Some(path_finder);
    }

    pub fn json_path_finder(&self) -> Arc<dyn PathFinder + Send + Sync> {
        self.json_path_finder
            .clone()
            .unwrap_or_else(|| Arc::new(DynamicPathFinder::json()))
    }

    pub fn set_yaml_path_finder(&mut self, path_finder: Arc<dyn PathFinder + Send + Sync>) {
        self.yaml_path_finder = Some(path_finder);
    }

    pub fn yaml_path_finder(&self) -> Arc<dyn PathFinder + Send + Sync> {
        self.yaml_path_finder
            .clone()
            .unwrap_or_else(|| Arc::new(YamlPathFinder::new()))
    }

    pub fn set_xml_path_finder(&mut self, path_finder: Arc<dyn PathFinder + Send + Sync>) {
        self.xml_path_finder = Some(path_finder);
    }

    pub fn xml_path_finder(&self) -> Arc<dyn PathFinder + Send + Sync> {
        self.xml_path_finder
            .clone()
            .unwrap_or_else(|| Arc::new(XmlPathFinder::new()))
    }

    /// Parses headers and `{body, headers}` envelopes given to request steps.
    pub fn set_deserializer(&mut self, deserializer: Arc<dyn Formatter + Send + Sync>) {
        self.deserializer = Some(deserializer);
    }

    pub fn deserializer(&self) -> Arc<dyn Formatter + Send + Sync> {
        self.deserializer
            .clone()
            .unwrap_or_else(|| Arc::new(JsonFormatter::new()))
    }

    pub fn set_string_schema_validator(&mut self, validator: Arc<dyn SchemaValidator + Send + Sync>) {
        self.string_schema_validator = Some(validator);
    }

    pub fn string_schema_validator(&self) -> Arc<dyn SchemaValidator + Send + Sync> {
        self.string_schema_validator
            .clone()
            .unwrap_or_else(|| Arc::new(RawSchemaValidator::new()))
    }

    pub fn set_reference_schema_validator(
        &mut self,
        validator: Arc<dyn SchemaValidator + Send + Sync>,
    ) {
        self.reference_schema_validator = Some(validator);
    }

    pub fn reference_schema_validator(&self) -> Arc<dyn SchemaValidator + Send + Sync> {
        self.reference_schema_validator.clone().unwrap_or_else(|| {
            Arc::new(ReferenceSchemaValidator::new(self.json_schema_dir.clone()))
        })
    }

    pub fn set_debugger(&mut self, debugger: Arc<dyn Debugger + Send + Sync>) {
        self.debugger = Some(debugger);
    }

    pub fn debugger(&self) -> Arc<dyn Debugger + Send + Sync> {
        self.debugger
            .clone()
            .unwrap_or_else(|| Arc::new(ConsoleDebugger::new(self.is_debug)))
    }
}

impl Default for ApiConfiguration {
    fn default() -> Self {
        Self::new()
    }
}
