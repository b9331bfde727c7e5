use super::{resolution_error, PathFinder};
use crate::error::Error;
use serde_json::Value;
use serde_json_path::JsonPath;

/// RFC 9535 JSONPath: `$.data.users[0].name`. A query that selects more than
/// one node yields an array of the selected nodes.
#[derive(Debug, Default)]
pub struct JsonPathQueryFinder;

impl JsonPathQueryFinder {
    pub fn new() -> Self {
        Self
    }
}

impl PathFinder for JsonPathQueryFinder {
    fn find(&self, expression: &str, document: &[u8]) -> Result<Value, Error> {
        let path = JsonPath::parse(expression)
            .map_err(|e| resolution_error(expression, format!("invalid JSONPath: {}", e)))?;
        let root: Value = serde_json::from_slice(document)
            .map_err(|e| resolution_error(expression, format!("invalid JSON: {}", e)))?;

        let mut nodes = path.query(&root).all();
        match nodes.len() {
            0 => Err(resolution_error(expression, "JSONPath selected no node")),
            1 => Ok(nodes.remove(0).clone()),
            _ => Ok(Value::Array(nodes.into_iter().cloned().collect())),
        }
    }
}
