mod cache;
mod configuration;
mod data;
mod debugger;
mod error;
mod formatter;
mod http_client;
mod http_context;
pub mod pathfinder;
pub mod random;
mod schema;
mod state;
mod steps;
mod template;
mod types;
mod util;
mod xml;

pub use apisteps_codegen::api_scenario;
pub use cache::{Cache, ConcurrentCache};
pub use configuration::ApiConfiguration;
pub use data::{
    BodyHeaders, CacheValue, DataFormat, RequestData, ResponseData, TimeDirection,
    LAST_HTTP_REQUEST_TIMESTAMP, LAST_HTTP_RESPONSE_TIMESTAMP,
};
pub use debugger::{ConsoleDebugger, Debugger};
pub use error::Error;
pub use formatter::{Formatter, JsonFormatter, XmlFormatter, YamlFormatter};
pub use http_client::{HttpClient, ReqwestHttpClient, DEFAULT_USER_AGENT};
pub use http_context::HttpContext;
pub use schema::{RawSchemaValidator, ReferenceSchemaValidator, SchemaValidator};
pub use state::State;
pub use template::{PlaceholderTemplateEngine, TemplateEngine};
pub use types::NodeType;
pub use util::curl_command;

#[doc(hidden)]
pub use futures;
