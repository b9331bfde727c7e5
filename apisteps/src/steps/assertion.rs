use crate::{
    data::{CacheValue, DataFormat, LAST_HTTP_REQUEST_TIMESTAMP, LAST_HTTP_RESPONSE_TIMESTAMP},
    error::Error,
    types::NodeType,
    xml, State,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::{fmt::Display, time::Duration};
use tracing::debug;

impl State {
    pub fn the_response_status_code_should_be(&self, code: u16) -> Result<(), Error> {
        let status_code = self.http_context.last_response()?.status_code;

        if status_code != code {
            return Err(Error::AssertionFailed(format!(
                "expected status code {}, but got {}",
                code, status_code
            )));
        }

        Ok(())
    }

    /// Plain text means anything that does not parse as JSON. XML needs a
    /// single well-formed root element.
    pub fn the_response_body_should_have_format(&self, format: DataFormat) -> Result<(), Error> {
        let body = self.http_context.last_response_body()?;
        let is_json = serde_json::from_slice::<Value>(body).is_ok();

        match format {
            DataFormat::Json if is_json => Ok(()),
            DataFormat::Json => Err(Error::AssertionFailed(
                "last response body is not a JSON document".into(),
            )),
            DataFormat::Yaml => match serde_yaml::from_slice::<serde_yaml::Value>(body) {
                Ok(serde_yaml::Value::Mapping(_)) | Ok(serde_yaml::Value::Sequence(_)) => Ok(()),
                _ => Err(Error::AssertionFailed(
                    "last response body is not a YAML document".into(),
                )),
            },
            DataFormat::Xml => match xml::to_value(body) {
                Ok(_) => Ok(()),
                Err(e) => Err(Error::AssertionFailed(format!(
                    "last response body is not an XML document: {}",
                    e
                ))),
            },
            DataFormat::PlainText if is_json => Err(Error::AssertionFailed(format!(
                "last response body has format {}",
                DataFormat::Json
            ))),
            DataFormat::PlainText => Ok(()),
        }
    }

    pub fn the_json_response_should_have_node(&self, expression: &str) -> Result<(), Error> {
        self.last_response_node(DataFormat::Json, expression)
            .map(|_| ())
    }

    /// `expressions` are separated by commas. Every missing node is reported.
    pub fn the_json_response_should_have_nodes(&self, expressions: &str) -> Result<(), Error> {
        let body = self.http_context.last_response_body()?;

        let causes: Vec<String> = expressions
            .split(',')
            .map(str::trim)
            .filter_map(|expression| {
                self.json_path_finder
                    .find(expression, body)
                    .err()
                    .map(|e| format!("node \"{}\": {}", expression, e))
            })
            .collect();

        if causes.is_empty() {
            return Ok(());
        }

        self.print_last_response_body_if_debugging();
        Err(Error::PathResolution {
            expression: expressions.to_string(),
            causes,
        })
    }

    pub fn the_json_node_should_be(&self, expression: &str, node_type: &str) -> Result<(), Error> {
        let (expected, actual) = self.node_type_of(expression, node_type)?;

        if actual != expected {
            return Err(Error::AssertionFailed(format!(
                "{} is {}, expected {}",
                expression, actual, expected
            )));
        }

        Ok(())
    }

    pub fn the_json_node_should_not_be(
        &self,
        expression: &str,
        node_type: &str,
    ) -> Result<(), Error> {
        let (expected, actual) = self.node_type_of(expression, node_type)?;

        if actual == expected {
            return Err(Error::AssertionFailed(format!(
                "{} should not be {}",
                expression, expected
            )));
        }

        Ok(())
    }

    pub fn the_json_node_should_be_slice_of_length(
        &self,
        expression: &str,
        length: usize,
    ) -> Result<(), Error> {
        match self.last_response_node(DataFormat::Json, expression)? {
            Value::Array(items) if items.len() == length => Ok(()),
            Value::Array(items) => Err(Error::AssertionFailed(format!(
                "{} slice has length {}, expected {}",
                expression,
                items.len(),
                length
            ))),
            other => {
                self.print_last_response_body_if_debugging();
                Err(Error::TypeMismatch(format!(
                    "{} does not point at a slice, found {}",
                    expression,
                    NodeType::of(&other)
                )))
            }
        }
    }

    /// `value_template` is read according to `data_type`. A fractional int
    /// node is truncated before comparison, one outside the 64-bit signed
    /// range is a type mismatch; nil, map and slice compare as JSON.
    pub fn the_json_node_should_be_of_value(
        &self,
        expression: &str,
        data_type: &str,
        value_template: &str,
    ) -> Result<(), Error> {
        let expected = self.replace_template(value_template)?;
        let data_type: NodeType = data_type.parse()?;
        let node = self.last_response_node(DataFormat::Json, expression)?;

        let mismatch = |actual: &dyn Display| -> Result<(), Error> {
            self.print_last_response_body_if_debugging();
            Err(Error::AssertionFailed(format!(
                "node {} {} value {} is not equal to expected {}",
                expression, data_type, actual, expected
            )))
        };
        let wrong_type = || -> Result<(), Error> {
            Err(Error::TypeMismatch(format!(
                "expected {} to be {}, got {}",
                expression, data_type, node
            )))
        };
        let unparsable = |e: &dyn Display| -> Result<(), Error> {
            Err(Error::InvalidArgument(format!(
                "expected value \"{}\" is not a valid {}: {}",
                expected, data_type, e
            )))
        };

        match data_type {
            NodeType::String => match node.as_str() {
                Some(actual) if actual == expected => Ok(()),
                Some(actual) => mismatch(&actual),
                None => wrong_type(),
            },
            NodeType::Int => {
                let actual = match (node.as_i64(), node.as_f64()) {
                    (Some(number), _) => number,
                    (None, Some(number))
                        if number >= i64::MIN as f64 && number < i64::MAX as f64 =>
                    {
                        number as i64
                    }
                    (None, Some(_)) => {
                        return Err(Error::TypeMismatch(format!(
                            "{} value {} does not fit into int",
                            expression, node
                        )))
                    }
                    (None, None) => return wrong_type(),
                };
                match expected.trim().parse::<i64>() {
                    Ok(value) if value == actual => Ok(()),
                    Ok(_) => mismatch(&actual),
                    Err(e) => unparsable(&e),
                }
            }
            NodeType::Float => {
                let actual = match node.as_f64() {
                    Some(number) => number,
                    None => return wrong_type(),
                };
                match expected.trim().parse::<f64>() {
                    Ok(value) if value == actual => Ok(()),
                    Ok(_) => mismatch(&actual),
                    Err(e) => unparsable(&e),
                }
            }
            NodeType::Bool => {
                let actual = match node.as_bool() {
                    Some(flag) => flag,
                    None => return wrong_type(),
                };
                match expected.trim().parse::<bool>() {
                    Ok(value) if value == actual => Ok(()),
                    Ok(_) => mismatch(&actual),
                    Err(e) => unparsable(&e),
                }
            }
            NodeType::Nil | NodeType::Map | NodeType::Slice => {
                if NodeType::of(&node) != data_type {
                    return wrong_type();
                }
                match serde_json::from_str::<Value>(&expected) {
                    Ok(value) if value == node => Ok(()),
                    Ok(_) => mismatch(&node),
                    Err(e) => unparsable(&e),
                }
            }
        }
    }

    pub fn the_response_should_have_header(&self, name: &str) -> Result<(), Error> {
        let response = self.http_context.last_response()?;
        self.print_last_response_headers_if_debugging();

        if response.header(name).is_empty() {
            return Err(Error::AssertionFailed(format!(
                "could not find header {} in last HTTP response",
                name
            )));
        }

        Ok(())
    }

    /// An absent header reads the same as an empty one, so expecting an
    /// empty value always fails.
    pub fn the_response_should_have_header_of_value(
        &self,
        name: &str,
        value_template: &str,
    ) -> Result<(), Error> {
        let response = self.http_context.last_response()?;
        let expected = self.replace_template(value_template)?;
        let actual = response.header(name);
        self.print_last_response_headers_if_debugging();

        if actual.is_empty() && expected.is_empty() {
            return Err(Error::AssertionFailed(format!(
                "could not find header {} in last HTTP response",
                name
            )));
        }

        if actual != expected {
            return Err(Error::AssertionFailed(format!(
                "{} header exists but, expected value: {}, is not equal to actual: {}",
                name, expected, actual
            )));
        }

        Ok(())
    }

    /// `reference` may be an URL, an absolute path or a path relative to the
    /// configured schema directory.
    pub fn i_validate_last_response_body_with_schema_reference(
        &self,
        reference: &str,
    ) -> Result<(), Error> {
        let response = self.http_context.last_response()?;

        self.reference_schema_validator
            .validate(&response.body, reference)
    }

    pub fn i_validate_last_response_body_with_schema_string(
        &self,
        schema: &str,
    ) -> Result<(), Error> {
        let response = self.http_context.last_response()?;

        self.string_schema_validator.validate(&response.body, schema)
    }

    pub fn time_between_last_http_request_response_should_be_less_than_or_equal_to(
        &self,
        bound: Duration,
    ) -> Result<(), Error> {
        let sent_at = self.saved_timestamp(LAST_HTTP_REQUEST_TIMESTAMP)?;
        let received_at = self.saved_timestamp(LAST_HTTP_RESPONSE_TIMESTAMP)?;
        let bound = chrono::Duration::from_std(bound)
            .map_err(|e| Error::InvalidArgument(format!("duration out of range: {}", e)))?;

        let elapsed = received_at.signed_duration_since(sent_at);
        debug!(elapsed_ms = elapsed.num_milliseconds(), "request took");

        if elapsed > bound {
            return Err(Error::AssertionFailed(format!(
                "time between last request and response should be at most {}ms, but it took {}ms",
                bound.num_milliseconds(),
                elapsed.num_milliseconds()
            )));
        }

        Ok(())
    }

    fn node_type_of(&self, expression: &str, node_type: &str) -> Result<(NodeType, NodeType), Error> {
        let expected: NodeType = node_type.parse()?;
        let node = self.last_response_node(DataFormat::Json, expression)?;

        Ok((expected, NodeType::of(&node)))
    }

    fn saved_timestamp(&self, key: &str) -> Result<DateTime<Utc>, Error> {
        match self.cache.get_saved(key)? {
            CacheValue::Time(time) => Ok(time),
            other => Err(Error::TypeMismatch(format!(
                "{} should hold a timestamp, found {}",
                key, other
            ))),
        }
    }

    fn print_last_response_headers_if_debugging(&self) {
        if !self.debugger.is_on() {
            return;
        }

        match self.http_context.last_response() {
            Ok(response) => self
                .debugger
                .print(&format!("last HTTP response headers: {:?}", response.headers)),
            Err(e) => self
                .debugger
                .print(&format!("could not obtain last response headers: {}", e)),
        }
    }
}
