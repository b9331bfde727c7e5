use super::{dot_path::DotPathFinder, resolution_error, PathFinder};
use crate::{error::Error, xml};
use serde_json::Value;

/// Dot notation over XML documents. The root element is the first segment,
/// attributes are reached as `@name`.
#[derive(Debug, Default)]
pub struct XmlPathFinder;

impl XmlPathFinder {
    pub fn new() -> Self {
        Self
    }
}

impl PathFinder for XmlPathFinder {
    fn find(&self, expression: &str, document: &[u8]) -> Result<Value, Error> {
        let root = xml::to_value(document)
            .map_err(|e| resolution_error(expression, format!("invalid XML: {}", e)))?;

        DotPathFinder::walk(expression, &root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_xml_document() {
        let document =
            br#"<user id="7"><name>ann</name><roles><role>admin</role><role>dev</role></roles></user>"#;
        let finder = XmlPathFinder::new();

        assert_eq!(finder.find("user.name", document).unwrap(), json!("ann"));
        assert_eq!(finder.find("user.@id", document).unwrap(), json!("7"));
        assert_eq!(finder.find("user.roles.role.1", document).unwrap(), json!("dev"));
        assert_eq!(finder.find("user.roles.role.#", document).unwrap(), json!(2));
        assert!(matches!(
            finder.find("user.age", document),
            Err(Error::PathResolution { .. })
        ));
        assert!(matches!(
            finder.find("user.name", b"{\"user\": 1}"),
            Err(Error::PathResolution { .. })
        ));
    }
}
