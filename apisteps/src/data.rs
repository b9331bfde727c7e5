use crate::error::Error;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use std::{collections::HashMap, fmt::Display, str::FromStr};

/// Cache key of the instant right before the last request was dispatched.
pub const LAST_HTTP_REQUEST_TIMESTAMP: &str = "LAST_HTTP_REQUEST_TIMESTAMP";
/// Cache key of the instant right after the last response was received.
pub const LAST_HTTP_RESPONSE_TIMESTAMP: &str = "LAST_HTTP_RESPONSE_TIMESTAMP";

#[derive(Debug, Clone, PartialEq)]
pub struct RequestData {
    pub method: String,
    pub url: String,
    /// Header names are kept lowercase, one value per name.
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RequestData {
    pub fn new<S1: Into<String>, S2: Into<String>>(method: S1, url: S2) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    pub fn set_header<S1: AsRef<str>, S2: Into<String>>(&mut self, name: S1, value: S2) {
        self.headers
            .insert(name.as_ref().to_lowercase(), value.into());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseData {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ResponseData {
    /// Case-insensitive header lookup. A missing header reads as an empty string.
    pub fn header<S: AsRef<str>>(&self, name: S) -> &str {
        self.headers
            .get(&name.as_ref().to_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Everything a scenario may keep in the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Json(serde_json::Value),
    Time(DateTime<Utc>),
    Request(RequestData),
}

impl Display for CacheValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheValue::Text(text) => write!(f, "{}", text),
            CacheValue::Int(value) => write!(f, "{}", value),
            CacheValue::Float(value) => write!(f, "{}", value),
            CacheValue::Bool(value) => write!(f, "{}", value),
            CacheValue::Json(serde_json::Value::String(text)) => write!(f, "{}", text),
            CacheValue::Json(node) => write!(f, "{}", node),
            CacheValue::Time(time) => {
                write!(f, "{}", time.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            CacheValue::Request(request) => write!(f, "{} {}", request.method, request.url),
        }
    }
}

impl From<&str> for CacheValue {
    fn from(value: &str) -> Self {
        CacheValue::Text(value.into())
    }
}

impl From<String> for CacheValue {
    fn from(value: String) -> Self {
        CacheValue::Text(value)
    }
}

impl From<i64> for CacheValue {
    fn from(value: i64) -> Self {
        CacheValue::Int(value)
    }
}

impl From<f64> for CacheValue {
    fn from(value: f64) -> Self {
        CacheValue::Float(value)
    }
}

impl From<bool> for CacheValue {
    fn from(value: bool) -> Self {
        CacheValue::Bool(value)
    }
}

impl From<serde_json::Value> for CacheValue {
    fn from(value: serde_json::Value) -> Self {
        CacheValue::Json(value)
    }
}

impl From<DateTime<Utc>> for CacheValue {
    fn from(value: DateTime<Utc>) -> Self {
        CacheValue::Time(value)
    }
}

impl From<RequestData> for CacheValue {
    fn from(value: RequestData) -> Self {
        CacheValue::Request(value)
    }
}

/// Envelope accepted by the one-shot send step.
#[derive(Debug, Default, Deserialize)]
pub struct BodyHeaders {
    #[serde(default)]
    pub body: serde_json::Value,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DataFormat {
    Json,
    Yaml,
    Xml,
    PlainText,
}

impl FromStr for DataFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(DataFormat::Json),
            "yaml" | "yml" => Ok(DataFormat::Yaml),
            "xml" => Ok(DataFormat::Xml),
            "plain text" | "plain-text" | "text" => Ok(DataFormat::PlainText),
            other => Err(Error::UnsupportedValue(format!(
                "unknown data format \"{}\", available: JSON, YAML, XML, plain text",
                other
            ))),
        }
    }
}

impl Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataFormat::Json => write!(f, "JSON"),
            DataFormat::Yaml => write!(f, "YAML"),
            DataFormat::Xml => write!(f, "XML"),
            DataFormat::PlainText => write!(f, "plain text"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TimeDirection {
    Forward,
    Backward,
}

impl FromStr for TimeDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forward" => Ok(TimeDirection::Forward),
            "backward" => Ok(TimeDirection::Backward),
            other => Err(Error::UnsupportedValue(format!(
                "unknown time direction \"{}\", allowed: forward, backward",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn cache_values_render_canonically() {
        assert_eq!(CacheValue::from("abc").to_string(), "abc");
        assert_eq!(CacheValue::Int(-7).to_string(), "-7");
        assert_eq!(CacheValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CacheValue::Bool(true).to_string(), "true");
        assert_eq!(CacheValue::Json(json!("quoted")).to_string(), "quoted");
        assert_eq!(CacheValue::Json(json!({"a": 1})).to_string(), r#"{"a":1}"#);
        assert_eq!(
            CacheValue::Time(Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap()).to_string(),
            "2021-03-04T05:06:07Z"
        );
    }

    #[test]
    fn header_lookup_ignores_case() {
        let mut headers = HashMap::new();
        headers.insert("x-test".to_string(), "abc".to_string());
        let response = ResponseData {
            status_code: 200,
            headers,
            body: String::new(),
        };

        assert_eq!(response.header("X-Test"), "abc");
        assert_eq!(response.header("X-Missing"), "");
    }

    #[test]
    fn request_headers_merge_case_insensitively() {
        let mut request = RequestData::new("GET", "http://localhost");
        request.set_header("Content-Type", "text/plain");
        request.set_header("content-type", "application/json");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.headers["content-type"], "application/json");
    }

    #[test]
    fn data_formats_parse() {
        assert_eq!("JSON".parse::<DataFormat>().unwrap(), DataFormat::Json);
        assert_eq!("plain text".parse::<DataFormat>().unwrap(), DataFormat::PlainText);
        assert_eq!(" XML ".parse::<DataFormat>().unwrap(), DataFormat::Xml);
        assert!(matches!(
            "csv".parse::<DataFormat>(),
            Err(Error::UnsupportedValue(_))
        ));
    }
}
