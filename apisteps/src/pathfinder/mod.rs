mod dot_path;
mod json_path;
mod xml;
mod yaml;

use crate::error::Error;
pub use dot_path::DotPathFinder;
pub use json_path::JsonPathQueryFinder;
use serde_json::Value;
use std::fmt::Debug;
pub use xml::XmlPathFinder;
pub use yaml::YamlPathFinder;

/// Obtains a single node from a document by a path expression.
pub trait PathFinder: Debug {
    fn find(&self, expression: &str, document: &[u8]) -> Result<Value, Error>;
}

/// Tries its finders in order and returns the first node found.
#[derive(Debug)]
pub struct DynamicPathFinder {
    finders: Vec<Box<dyn PathFinder + Send + Sync>>,
}

impl DynamicPathFinder {
    pub fn new(finders: Vec<Box<dyn PathFinder + Send + Sync>>) -> Self {
        Self { finders }
    }

    /// Dot notation first, JSONPath second.
    pub fn json() -> Self {
        Self::new(vec![
            Box::new(DotPathFinder::new()),
            Box::new(JsonPathQueryFinder::new()),
        ])
    }
}

impl Default for DynamicPathFinder {
    fn default() -> Self {
        Self::json()
    }
}

impl PathFinder for DynamicPathFinder {
    fn find(&self, expression: &str, document: &[u8]) -> Result<Value, Error> {
        let mut causes = Vec::with_capacity(self.finders.len());

        for finder in &self.finders {
            match finder.find(expression, document) {
                Ok(node) => return Ok(node),
                Err(Error::PathResolution { causes: inner, .. }) => causes.extend(inner),
                Err(e) => causes.push(e.to_string()),
            }
        }

        if causes.is_empty() {
            causes.push("no path finder configured".into());
        }

        Err(Error::PathResolution {
            expression: expression.to_string(),
            causes,
        })
    }
}

pub(crate) fn resolution_error<S: Into<String>>(expression: &str, cause: S) -> Error {
    Error::PathResolution {
        expression: expression.to_string(),
        causes: vec![cause.into()],
    }
}
