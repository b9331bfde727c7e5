use crate::{
    cache::Cache,
    configuration::ApiConfiguration,
    data::DataFormat,
    debugger::Debugger,
    error::Error,
    formatter::Formatter,
    http_context::HttpContext,
    pathfinder::{resolution_error, PathFinder},
    schema::SchemaValidator,
    template::TemplateEngine,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Everything the steps of one scenario share. Steps are methods of this
/// struct; one instance must not be driven by overlapping sends.
#[derive(Debug)]
pub struct State {
    pub(crate) cache: Arc<dyn Cache + Send + Sync>,
    pub(crate) http_context: HttpContext,
    pub(crate) template_engine: Arc<dyn TemplateEngine + Send + Sync>,
    pub(crate) json_path_finder: Arc<dyn PathFinder + Send + Sync>,
    pub(crate) yaml_path_finder: Arc<dyn PathFinder + Send + Sync>,
    pub(crate) xml_path_finder: Arc<dyn PathFinder + Send + Sync>,
    pub(crate) deserializer: Arc<dyn Formatter + Send + Sync>,
    pub(crate) string_schema_validator: Arc<dyn SchemaValidator + Send + Sync>,
    pub(crate) reference_schema_validator: Arc<dyn SchemaValidator + Send + Sync>,
    pub(crate) debugger: Arc<dyn Debugger + Send + Sync>,
}

impl State {
    pub fn new(configuration: ApiConfiguration) -> Result<Self, Error> {
        Ok(Self {
            cache: configuration.cache(),
            http_context: HttpContext::new(configuration.http_client()?),
            template_engine: configuration.template_engine(),
            json_path_finder: configuration.json_path_finder(),
            yaml_path_finder: configuration.yaml_path_finder(),
            xml_path_finder: configuration.xml_path_finder(),
            deserializer: configuration.deserializer(),
            string_schema_validator: configuration.string_schema_validator(),
            reference_schema_validator: configuration.reference_schema_validator(),
            debugger: configuration.debugger(),
        })
    }

    pub fn cache(&self) -> Arc<dyn Cache + Send + Sync> {
        self.cache.clone()
    }

    pub fn http_context(&self) -> &HttpContext {
        &self.http_context
    }

    pub fn debugger(&self) -> Arc<dyn Debugger + Send + Sync> {
        self.debugger.clone()
    }

    /// Forgets everything the last scenario left behind.
    pub fn reset_state(&mut self, is_debug: bool) -> Result<(), Error> {
        self.cache.reset()?;
        self.http_context.clear();
        self.debugger.reset(is_debug);
        debug!(is_debug, "state reset");

        Ok(())
    }

    pub(crate) fn replace_template(&self, template: &str) -> Result<String, Error> {
        self.template_engine.replace(template, &self.cache.all()?)
    }

    pub(crate) fn last_response_node(
        &self,
        format: DataFormat,
        expression: &str,
    ) -> Result<Value, Error> {
        let body = self.http_context.last_response_body()?;
        let path_finder = match format {
            DataFormat::Json => &self.json_path_finder,
            DataFormat::Yaml => &self.yaml_path_finder,
            DataFormat::Xml => &self.xml_path_finder,
            DataFormat::PlainText => {
                return Err(Error::UnsupportedValue(format!(
                    "nodes can not be found in {} documents",
                    format
                )))
            }
        };

        path_finder.find(expression, body).map_err(|e| {
            debug!(expression, error = %e, "node resolution failed");
            self.print_last_response_body_if_debugging();

            match e {
                Error::PathResolution { .. } => e,
                other => resolution_error(expression, other.to_string()),
            }
        })
    }

    pub(crate) fn print_last_response_body_if_debugging(&self) {
        if self.debugger.is_on() {
            if let Ok(response) = self.http_context.last_response() {
                self.debugger
                    .print(&format!("last response body:\n\n{}\n", response.body));
            }
        }
    }
}
