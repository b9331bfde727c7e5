use super::{resolution_error, PathFinder};
use crate::error::Error;
use serde_json::Value;

/// Dot notation: `data.users.0.name`. `#` on an array yields its length and
/// `\.` keeps a literal dot inside a key.
#[derive(Debug, Default)]
pub struct DotPathFinder;

impl DotPathFinder {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn walk(expression: &str, root: &Value) -> Result<Value, Error> {
        let segments = Self::segments(expression);
        if segments.iter().any(String::is_empty) {
            return Err(resolution_error(
                expression,
                "dot notation does not allow empty segments",
            ));
        }

        let mut current = root;
        for segment in &segments {
            current = match current {
                Value::Object(map) => map.get(segment).ok_or_else(|| {
                    resolution_error(expression, format!("key \"{}\" does not exist", segment))
                })?,
                Value::Array(items) if segment == "#" => {
                    return Ok(Value::from(items.len()));
                }
                Value::Array(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index))
                    .ok_or_else(|| {
                        resolution_error(
                            expression,
                            format!(
                                "\"{}\" is not a valid index of an array of length {}",
                                segment,
                                items.len()
                            ),
                        )
                    })?,
                _ => {
                    return Err(resolution_error(
                        expression,
                        format!("cannot descend into a scalar with \"{}\"", segment),
                    ))
                }
            };
        }

        Ok(current.clone())
    }

    fn segments(expression: &str) -> Vec<String> {
        let mut segments = Vec::new();
        let mut segment = String::new();
        let mut chars = expression.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => segment.push(escaped),
                    None => segment.push(c),
                },
                '.' => segments.push(std::mem::take(&mut segment)),
                _ => segment.push(c),
            }
        }
        segments.push(segment);

        segments
    }
}

impl PathFinder for DotPathFinder {
    fn find(&self, expression: &str, document: &[u8]) -> Result<Value, Error> {
        let root: Value = serde_json::from_slice(document)
            .map_err(|e| resolution_error(expression, format!("invalid JSON: {}", e)))?;

        Self::walk(expression, &root)
    }
}
