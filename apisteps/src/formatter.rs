use crate::{error::Error, xml};
use serde_json::Value;
use std::fmt::Debug;

/// Serializes and deserializes data of one format.
pub trait Formatter: Debug {
    fn serialize(&self, value: &Value) -> Result<String, Error>;
    fn deserialize(&self, data: &[u8]) -> Result<Value, Error>;
}

#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for JsonFormatter {
    fn serialize(&self, value: &Value) -> Result<String, Error> {
        Ok(serde_json::to_string(value)?)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value, Error> {
        Ok(serde_json::from_slice(data)?)
    }
}

#[derive(Debug, Default)]
pub struct YamlFormatter;

impl YamlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for YamlFormatter {
    fn serialize(&self, value: &Value) -> Result<String, Error> {
        Ok(serde_yaml::to_string(value)?)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value, Error> {
        Ok(serde_yaml::from_slice(data)?)
    }
}

/// Reads documents the way the XML path finder sees them. Writing needs an
/// object with exactly one key, the root element.
#[derive(Debug, Default)]
pub struct XmlFormatter;

impl XmlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for XmlFormatter {
    fn serialize(&self, value: &Value) -> Result<String, Error> {
        let mut fields = value.as_object().into_iter().flatten();

        match (fields.next(), fields.next()) {
            (Some((root, inner)), None) => Ok(quick_xml::se::to_string_with_root(root, inner)?),
            _ => Err(Error::UnsupportedValue(format!(
                "XML needs an object with a single root element, got {}",
                value
            ))),
        }
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value, Error> {
        xml::to_value(data)
    }
}
