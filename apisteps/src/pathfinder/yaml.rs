use super::{dot_path::DotPathFinder, resolution_error, PathFinder};
use crate::error::Error;
use serde_json::Value;

/// Dot notation over YAML documents.
#[derive(Debug, Default)]
pub struct YamlPathFinder;

impl YamlPathFinder {
    pub fn new() -> Self {
        Self
    }
}

impl PathFinder for YamlPathFinder {
    fn find(&self, expression: &str, document: &[u8]) -> Result<Value, Error> {
        let root: Value = serde_yaml::from_slice(document)
            .map_err(|e| resolution_error(expression, format!("invalid YAML: {}", e)))?;

        DotPathFinder::walk(expression, &root)
    }
}
