use crate::error::Error;
use serde_json::Value;
use std::{fmt::Display, str::FromStr};

/// Type tags a JSON node may be checked against.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NodeType {
    Nil,
    String,
    Int,
    Float,
    Bool,
    Map,
    Slice,
}

impl NodeType {
    /// JSON numbers are inspected as `f64`: a zero fractional part makes an
    /// int, anything else a float. `5.0` is therefore an int and not a float,
    /// and integers past 2^53 are classified after the lossy conversion.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NodeType::Nil,
            Value::String(_) => NodeType::String,
            Value::Bool(_) => NodeType::Bool,
            Value::Object(_) => NodeType::Map,
            Value::Array(_) => NodeType::Slice,
            Value::Number(number) => match number.as_f64() {
                Some(float) if float.fract() != 0.0 => NodeType::Float,
                _ => NodeType::Int,
            },
        }
    }
}

impl FromStr for NodeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nil" => Ok(NodeType::Nil),
            "string" => Ok(NodeType::String),
            "int" => Ok(NodeType::Int),
            "float" => Ok(NodeType::Float),
            "bool" => Ok(NodeType::Bool),
            "map" => Ok(NodeType::Map),
            "slice" => Ok(NodeType::Slice),
            other => Err(Error::UnsupportedValue(format!(
                "{} is unknown type, available: nil, string, int, float, bool, map, slice",
                other
            ))),
        }
    }
}

impl Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeType::Nil => "nil",
            NodeType::String => "string",
            NodeType::Int => "int",
            NodeType::Float => "float",
            NodeType::Bool => "bool",
            NodeType::Map => "map",
            NodeType::Slice => "slice",
        };

        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_kinds() {
        assert_eq!(NodeType::of(&json!(null)), NodeType::Nil);
        assert_eq!(NodeType::of(&json!("5")), NodeType::String);
        assert_eq!(NodeType::of(&json!(false)), NodeType::Bool);
        assert_eq!(NodeType::of(&json!({})), NodeType::Map);
        assert_eq!(NodeType::of(&json!([1])), NodeType::Slice);
    }

    #[test]
    fn test_numbers_split_on_fractional_part() {
        assert_eq!(NodeType::of(&json!(5)), NodeType::Int);
        assert_eq!(NodeType::of(&json!(-3)), NodeType::Int);
        assert_eq!(NodeType::of(&json!(5.5)), NodeType::Float);
    }

    // Boundary rule: a float literal with a zero fractional part counts as int.
    #[test]
    fn test_whole_float_is_int() {
        let node: Value = serde_json::from_str("5.0").unwrap();
        assert_eq!(NodeType::of(&node), NodeType::Int);
    }

    // Boundary rule: precision past 2^53 is lost before classification.
    #[test]
    fn test_large_integers_are_int() {
        let node: Value = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(NodeType::of(&node), NodeType::Int);
    }

    #[test]
    fn test_tags_parse() {
        for tag in ["nil", "string", "int", "float", "bool", "map", "slice"] {
            assert_eq!(tag.parse::<NodeType>().unwrap().to_string(), tag);
        }
        assert!(matches!(
            "number".parse::<NodeType>(),
            Err(Error::UnsupportedValue(_))
        ));
    }
}
